use std::collections::BTreeMap;

use confluence_types::{
    Aggregation, InterpolationMode, MergeConfig, ModeOverride, ReductionKind, Resampling,
    SampledPoint, TimeInterval, Value,
};

#[test]
fn merge_config_roundtrip() {
    let mut lower = BTreeMap::new();
    lower.insert(1, SampledPoint::good(-5, 3.5));
    let cfg = MergeConfig {
        max_historical_values: 4,
        resampling: Resampling::FixedStep { step: 60_000, start: 0 },
        aggregation: Aggregation::Average,
        modes: ModeOverride::PerSeries(vec![InterpolationMode::Linear, InterpolationMode::Steps]),
        lower_boundaries: lower,
        upper_boundaries: BTreeMap::new(),
        window: Some(TimeInterval::new(0, 3_600_000)),
    };

    let json = serde_json::to_string(&cfg).expect("serialize merge config");
    let de: MergeConfig = serde_json::from_str(&json).expect("deserialize merge config");

    assert_eq!(de, cfg);
    assert_eq!(de.lower_boundaries[&1].value, Value::Float(3.5));
}

#[test]
fn default_merge_config_is_native_interpolate() {
    let cfg = MergeConfig::default();
    assert_eq!(cfg.resampling, Resampling::Native);
    assert_eq!(cfg.aggregation, Aggregation::Interpolate);
    assert_eq!(cfg.modes, ModeOverride::Intrinsic);
    assert_eq!(cfg.max_historical_values, 0);
    assert!(cfg.validate(0).is_ok());
}

#[test]
fn interpolation_mode_uses_upper_case_names() {
    let json = serde_json::to_string(&InterpolationMode::Nearest).unwrap();
    assert_eq!(json, "\"NEAREST\"");
    let de: InterpolationMode = serde_json::from_str("\"STEPS\"").unwrap();
    assert_eq!(de, InterpolationMode::Steps);
}

#[test]
fn reduction_kind_roundtrip() {
    for kind in [
        ReductionKind::Sum,
        ReductionKind::Average,
        ReductionKind::And,
        ReductionKind::Or,
    ] {
        let json = serde_json::to_string(&kind).unwrap();
        let de: ReductionKind = serde_json::from_str(&json).unwrap();
        assert_eq!(de, kind);
    }
}

#[test]
fn sampled_point_carries_kind_tag() {
    let p = SampledPoint::good(10, true);
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json["value"]["kind"], "boolean");
    assert_eq!(json["quality"], "GOOD");
}
