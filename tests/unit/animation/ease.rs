use super::*;

const MONOTONIC: [Ease; 14] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InSine,
    Ease::OutSine,
    Ease::InOutSine,
    Ease::EaseIn,
    Ease::EaseOut,
    Ease::EaseInOut,
    Ease::CubicBezier([0.25, 0.1, 0.25, 1.0]),
];

#[test]
fn endpoints_are_fixed() {
    for ease in MONOTONIC.into_iter().chain([Ease::ElasticOut, Ease::BounceOut]) {
        assert!(ease.apply(0.0).abs() < 1e-9, "{ease:?} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?} at 1");
    }
}

#[test]
fn monotonic_variants_never_decrease() {
    for ease in MONOTONIC {
        let mut prev = ease.apply(0.0);
        for i in 1..=200 {
            let v = ease.apply(f64::from(i) / 200.0);
            assert!(v + 1e-9 >= prev, "{ease:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn input_outside_unit_interval_is_clamped() {
    assert_eq!(Ease::InQuad.apply(-3.0), 0.0);
    assert_eq!(Ease::InQuad.apply(4.0), 1.0);
    assert_eq!(Ease::Linear.apply(f64::NAN), 0.0);
}

#[test]
fn ease_parses_strings_and_bezier_objects() {
    let v: Ease = serde_json::from_str("\"ease_in_out\"").unwrap();
    assert_eq!(v, Ease::EaseInOut);
    let v: Ease = serde_json::from_str("{\"cubic_bezier\": [0.25, 0.1, 0.25, 1.0]}").unwrap();
    assert_eq!(v, Ease::CubicBezier([0.25, 0.1, 0.25, 1.0]));
}

#[test]
fn bezier_outside_css_domain_is_rejected() {
    assert!(Ease::CubicBezier([1.5, 0.0, 0.5, 1.0]).validate().is_err());
    assert!(Ease::CubicBezier([0.5, -2.0, 0.5, 3.0]).validate().is_ok());
    assert!(Ease::OutCubic.validate().is_ok());
}
