use confluence_types::{
    ConfluenceError, InterpolationMode, MergeConfig, ModeOverride, Resampling, SampledPoint,
    TimeInterval,
};

fn assert_invalid(cfg: &MergeConfig, n: usize) {
    match cfg.validate(n) {
        Err(ConfluenceError::InvalidArg(_)) => {}
        other => panic!("expected InvalidArg, got {other:?}"),
    }
}

#[test]
fn non_positive_step_is_rejected() {
    for step in [0, -10] {
        let cfg = MergeConfig {
            resampling: Resampling::FixedStep { step, start: 0 },
            ..MergeConfig::default()
        };
        assert_invalid(&cfg, 2);
    }
}

#[test]
fn ruler_indices_must_be_in_range_and_non_empty() {
    let empty = MergeConfig {
        resampling: Resampling::StepRuler { rulers: vec![] },
        ..MergeConfig::default()
    };
    assert_invalid(&empty, 2);

    let out_of_range = MergeConfig {
        resampling: Resampling::StepRuler { rulers: vec![0, 2] },
        ..MergeConfig::default()
    };
    assert_invalid(&out_of_range, 2);

    let ok = MergeConfig {
        resampling: Resampling::StepRuler { rulers: vec![1] },
        ..MergeConfig::default()
    };
    assert!(ok.validate(2).is_ok());
}

#[test]
fn per_series_modes_must_match_input_count() {
    let cfg = MergeConfig {
        modes: ModeOverride::PerSeries(vec![InterpolationMode::Linear]),
        ..MergeConfig::default()
    };
    assert_invalid(&cfg, 2);
    assert!(cfg.validate(1).is_ok());
}

#[test]
fn boundary_indices_must_be_in_range() {
    let mut cfg = MergeConfig::default();
    cfg.upper_boundaries.insert(3, SampledPoint::good(100, 1.0));
    assert_invalid(&cfg, 3);
    assert!(cfg.validate(4).is_ok());
}

#[test]
fn reversed_window_is_rejected() {
    let cfg = MergeConfig {
        window: Some(TimeInterval::new(10, 5)),
        ..MergeConfig::default()
    };
    assert_invalid(&cfg, 1);
    assert!(TimeInterval::try_new(10, 5).is_err());
}

#[test]
fn mode_override_resolution() {
    let per = ModeOverride::PerSeries(vec![InterpolationMode::Steps, InterpolationMode::Nearest]);
    assert_eq!(per.mode_for(1, InterpolationMode::Linear), InterpolationMode::Nearest);
    let global = ModeOverride::Global(InterpolationMode::None);
    assert_eq!(global.mode_for(0, InterpolationMode::Linear), InterpolationMode::None);
    assert_eq!(
        ModeOverride::Intrinsic.mode_for(0, InterpolationMode::Linear),
        InterpolationMode::Linear
    );
}

#[test]
fn interval_algebra() {
    let a = TimeInterval::new(0, 10);
    let b = TimeInterval::new(5, 20);
    assert_eq!(a.intersect(&b), TimeInterval::new(5, 10));
    assert!(a.contains(0));
    assert!(!a.contains(10));
    assert!(TimeInterval::new(7, 7).is_empty());
    assert!(a.intersect(&TimeInterval::new(10, 12)).is_empty());
    assert!(TimeInterval::ALL.contains_interval(&a));
    assert_eq!(TimeInterval::closed(0, 10).length(), 11);
}
