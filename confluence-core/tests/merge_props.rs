use std::collections::{BTreeMap, BTreeSet};

use confluence_core::{InterpolationMode, MemoryTimeSeries, MultiSeriesMerger, SampledPoint};
use proptest::prelude::*;

fn build(stamps: &BTreeSet<i64>, tag: f64) -> MemoryTimeSeries {
    MemoryTimeSeries::from_points(
        InterpolationMode::Steps,
        stamps.iter().map(|&t| SampledPoint::good(t, tag + t as f64)),
    )
    .unwrap()
}

fn arb_stamps() -> impl Strategy<Value = BTreeSet<i64>> {
    proptest::collection::btree_set(-5_000i64..5_000, 0..40)
}

proptest! {
    #[test]
    fn merge_visits_sorted_union(sets in proptest::collection::vec(arb_stamps(), 0..5)) {
        let series: Vec<MemoryTimeSeries> = sets
            .iter()
            .enumerate()
            .map(|(i, s)| build(s, i as f64 * 100_000.0))
            .collect();
        let merger = MultiSeriesMerger::builder().series_all(series.iter()).build().unwrap();

        let mut expected: BTreeMap<i64, BTreeSet<usize>> = BTreeMap::new();
        for (i, s) in sets.iter().enumerate() {
            for &t in s {
                expected.entry(t).or_default().insert(i);
            }
        }

        let mut seen = Vec::new();
        for dp in merger {
            let members: BTreeSet<usize> = dp.elements().keys().copied().collect();
            prop_assert_eq!(Some(&members), expected.get(&dp.timestamp()));
            for (&idx, p) in dp.elements() {
                prop_assert_eq!(p.timestamp, dp.timestamp());
                prop_assert!(sets[idx].contains(&p.timestamp));
            }
            seen.push(dp.timestamp());
        }
        prop_assert_eq!(seen, expected.keys().copied().collect::<Vec<_>>());
    }

    #[test]
    fn merge_is_symmetric_under_index_swap(a in arb_stamps(), b in arb_stamps()) {
        let (sa, sb) = (build(&a, 0.0), build(&b, 100_000.0));
        let ab: Vec<_> = MultiSeriesMerger::builder().series(&sa).series(&sb).build().unwrap().collect();
        let ba: Vec<_> = MultiSeriesMerger::builder().series(&sb).series(&sa).build().unwrap().collect();
        prop_assert_eq!(ab.len(), ba.len());
        for (x, y) in ab.iter().zip(ba.iter()) {
            prop_assert_eq!(x.timestamp(), y.timestamp());
            prop_assert_eq!(x.value(0), y.value(1));
            prop_assert_eq!(x.value(1), y.value(0));
        }
    }

    #[test]
    fn generations_increase_by_one(a in arb_stamps()) {
        let sa = build(&a, 0.0);
        let merger = MultiSeriesMerger::builder().series(&sa).build().unwrap();
        for (i, dp) in merger.enumerate() {
            prop_assert_eq!(dp.generation(), i as u64 + 1);
        }
    }
}
