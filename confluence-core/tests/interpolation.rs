use confluence_core::{
    InterpolationFunction, InterpolationMode, Quality, SampledPoint, Value, function_for,
    interpolate,
};

fn p(t: i64, v: f64) -> SampledPoint {
    SampledPoint::good(t, v)
}

#[test]
fn exact_neighbour_is_returned_for_every_mode() {
    let (l, r) = (p(0, 1.0), p(10, 3.0));
    for mode in [
        InterpolationMode::None,
        InterpolationMode::Steps,
        InterpolationMode::Linear,
        InterpolationMode::Nearest,
    ] {
        assert_eq!(interpolate(mode, Some(&l), Some(&r), 0), Some(l.clone()));
        assert_eq!(interpolate(mode, Some(&l), Some(&r), 10), Some(r.clone()));
    }
}

#[test]
fn none_defines_only_literal_points() {
    assert_eq!(interpolate(InterpolationMode::None, Some(&p(0, 1.0)), Some(&p(10, 2.0)), 5), None);
}

#[test]
fn steps_hold_the_previous_value() {
    let v = interpolate(InterpolationMode::Steps, Some(&p(0, 1.0)), None, 50).unwrap();
    assert_eq!(v, p(50, 1.0));
    assert_eq!(interpolate(InterpolationMode::Steps, None, Some(&p(10, 1.0)), 5), None);
}

#[test]
fn linear_needs_both_sides_and_good_quality() {
    let v = interpolate(InterpolationMode::Linear, Some(&p(0, 10.0)), Some(&p(10, 20.0)), 5).unwrap();
    assert_eq!(v, p(5, 15.0));
    assert_eq!(interpolate(InterpolationMode::Linear, Some(&p(0, 10.0)), None, 5), None);

    let bad = SampledPoint::new(10, 20.0, Quality::Bad);
    let v = interpolate(InterpolationMode::Linear, Some(&p(0, 10.0)), Some(&bad), 5).unwrap();
    assert_eq!(v.quality, Quality::Bad);
}

#[test]
fn linear_truncates_integers_and_treats_booleans_as_nearest() {
    let l = SampledPoint::good(0, 1_i32);
    let r = SampledPoint::good(10, 2_i32);
    let v = interpolate(InterpolationMode::Linear, Some(&l), Some(&r), 9).unwrap();
    assert_eq!(v.value, Value::Integer(1));

    let l = SampledPoint::good(0, true);
    let r = SampledPoint::good(10, false);
    let v = interpolate(InterpolationMode::Linear, Some(&l), Some(&r), 7).unwrap();
    assert_eq!(v.value, Value::Boolean(false));
}

#[test]
fn nearest_prefers_the_earlier_point_on_ties() {
    let (l, r) = (p(0, 1.0), p(10, 2.0));
    assert_eq!(interpolate(InterpolationMode::Nearest, Some(&l), Some(&r), 5).unwrap().value, Value::Float(1.0));
    assert_eq!(interpolate(InterpolationMode::Nearest, Some(&l), Some(&r), 6).unwrap().value, Value::Float(2.0));
    assert_eq!(interpolate(InterpolationMode::Nearest, None, Some(&r), 3).unwrap().value, Value::Float(2.0));
}

#[test]
fn integrals_per_mode() {
    let (a, b) = (p(0, 10.0), p(10, 20.0));
    assert_eq!(function_for(InterpolationMode::Linear).integrate(&a, &b), 150.0);
    assert_eq!(function_for(InterpolationMode::Steps).integrate(&a, &b), 100.0);
    assert_eq!(function_for(InterpolationMode::None).integrate(&a, &b), 0.0);
    assert_eq!(function_for(InterpolationMode::Nearest).integrate(&a, &b), 0.0);
}

#[test]
fn integrals_are_antisymmetric() {
    let (a, b) = (p(0, 10.0), p(10, 20.0));
    for mode in [InterpolationMode::Linear, InterpolationMode::Steps] {
        let f = function_for(mode);
        assert_eq!(f.integrate(&b, &a), -f.integrate(&a, &b));
    }
}

#[test]
fn bad_endpoints_contribute_nothing() {
    let bad = SampledPoint::bad(10);
    assert_eq!(function_for(InterpolationMode::Linear).integrate(&p(0, 1.0), &bad), 0.0);
    assert_eq!(function_for(InterpolationMode::Steps).integrate(&bad, &p(20, 1.0)), 0.0);
}

#[test]
fn linear_split_at_zero_crossing() {
    let f = function_for(InterpolationMode::Linear);
    let (a, b) = (p(0, -10.0), p(10, 10.0));
    assert_eq!(f.integrate(&a, &b), 0.0);
    assert!((f.integrate_absolute(&a, &b).unwrap() - 50.0).abs() < 1e-9);
    assert!((f.integrate_positive(&a, &b).unwrap() - 25.0).abs() < 1e-9);
}

#[test]
fn sign_splitting_is_linear_only() {
    let (a, b) = (p(0, -10.0), p(10, 10.0));
    for mode in [InterpolationMode::Steps, InterpolationMode::Nearest, InterpolationMode::None] {
        let err = function_for(mode).integrate_absolute(&a, &b).unwrap_err();
        assert!(matches!(err, confluence_core::ConfluenceError::Unsupported { .. }));
    }
}
