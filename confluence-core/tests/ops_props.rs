use std::collections::BTreeMap;

use confluence_core::{
    FloatSeriesExt, InterpolationMode, MemoryTimeSeries, ReadOnlyTimeSeries, SampledPoint,
    TimeInterval,
};
use proptest::prelude::*;

fn arb_linear_series() -> impl Strategy<Value = MemoryTimeSeries> {
    proptest::collection::btree_map(0i64..10_000, -1_000.0f64..1_000.0, 0..60).prop_map(
        |pts: BTreeMap<i64, f64>| {
            MemoryTimeSeries::from_points(
                InterpolationMode::Linear,
                pts.into_iter().map(|(t, v)| SampledPoint::good(t, v)),
            )
            .unwrap()
        },
    )
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #[test]
    fn integral_is_antisymmetric(s in arb_linear_series(), t0 in -1_000i64..11_000, t1 in -1_000i64..11_000) {
        prop_assert_eq!(s.integrate(t0, t1), -s.integrate(t1, t0));
    }

    #[test]
    fn integral_is_additive(
        s in arb_linear_series(),
        mut ts in proptest::collection::vec(-1_000i64..11_000, 3),
    ) {
        ts.sort_unstable();
        let (t0, t1, t2) = (ts[0], ts[1], ts[2]);
        let split = s.integrate(t0, t1) + s.integrate(t1, t2);
        let whole = s.integrate(t0, t2);
        prop_assert!(close(split, whole), "split {split} vs whole {whole}");
    }

    #[test]
    fn absolute_integral_dominates(s in arb_linear_series(), t0 in 0i64..10_000, len in 0i64..5_000) {
        let plain = s.integrate(t0, t0 + len);
        let abs = s.integrate_absolute(t0, t0 + len).unwrap();
        let pos = s.integrate_positive(t0, t0 + len).unwrap();
        prop_assert!(abs + 1e-6 * (1.0 + abs) >= plain.abs());
        prop_assert!(pos >= -1e-9);
        prop_assert!(abs + 1e-6 >= pos);
    }

    #[test]
    fn downsample_is_bounded_by_raw(s in arb_linear_series(), t0 in 0i64..10_000, len in 0i64..10_000, m in 0i64..2_000) {
        let raw = s.values(TimeInterval::new(t0, t0 + len));
        let thin = s.downsample(t0, t0 + len, m);
        prop_assert!(thin.len() <= raw.len());
        prop_assert_eq!(thin.first().map(|p| p.timestamp), raw.first().map(|p| p.timestamp));
        prop_assert_eq!(thin.last().map(|p| p.timestamp), raw.last().map(|p| p.timestamp));
    }

    #[test]
    fn positive_domain_is_sorted_disjoint_and_inside(s in arb_linear_series(), t0 in 0i64..10_000, len in 1i64..10_000) {
        let search = TimeInterval::new(t0, t0 + len);
        let domain = s.positive_domain(search).unwrap();
        for iv in &domain {
            prop_assert!(iv.exists());
            prop_assert!(search.contains_interval(iv));
        }
        prop_assert!(domain.windows(2).all(|w| w[0].end < w[1].start));
    }
}
