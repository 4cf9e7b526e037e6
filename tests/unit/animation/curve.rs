use super::*;

fn scale_curve() -> Curve<f64> {
    Curve::from_pairs([(0.0, 1.0), (30.0, 1.2)]).unwrap()
}

#[test]
fn linear_midpoint_matches_reference_value() {
    let v = scale_curve().sample(15.0);
    assert!((v - 1.1).abs() < 1e-12, "got {v}");
}

#[test]
fn clamps_before_first_and_after_last() {
    let c = scale_curve();
    for p in [-100.0, -1.0, 0.0] {
        assert_eq!(c.sample(p), 1.0);
    }
    for p in [30.0, 31.0, 1e9] {
        assert_eq!(c.sample(p), 1.2);
    }
}

#[test]
fn interpolation_is_monotonic_inside_segment() {
    let c = Curve::from_pairs([(10.0, 5.0), (20.0, -3.0)]).unwrap();
    let mut prev = c.sample(10.0);
    for i in 1..=100 {
        let v = c.sample(10.0 + f64::from(i) * 0.1);
        assert!(v <= prev, "value rose at step {i}");
        assert!((-3.0..=5.0).contains(&v));
        prev = v;
    }
}

#[test]
fn repeated_sampling_is_bit_identical() {
    let c = scale_curve().with_ease(Ease::EaseInOut);
    for p in [0.5, 7.25, 15.0, 29.9] {
        assert_eq!(c.sample(p).to_bits(), c.sample(p).to_bits());
    }
}

#[test]
fn easing_is_applied_to_local_progress() {
    let c = Curve::from_pairs([(0.0, 0.0), (10.0, 100.0)])
        .unwrap()
        .with_ease(Ease::InQuad);
    assert!((c.sample(5.0) - 25.0).abs() < 1e-9);
    assert_eq!(c.sample(10.0), 100.0);
}

#[test]
fn extend_continues_boundary_segments() {
    let c = Curve::from_pairs([(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)])
        .unwrap()
        .with_extrapolation(Extrapolate::Extend, Extrapolate::Extend);
    assert!((c.sample(-5.0) + 5.0).abs() < 1e-9);
    assert!((c.sample(25.0) + 5.0).abs() < 1e-9);
}

#[test]
fn single_breakpoint_is_constant() {
    let c = Curve::from_pairs([(4.0, 0.5)])
        .unwrap()
        .with_extrapolation(Extrapolate::Extend, Extrapolate::Extend);
    assert_eq!(c.sample(-10.0), 0.5);
    assert_eq!(c.sample(4.0), 0.5);
    assert_eq!(c.sample(40.0), 0.5);
}

#[test]
fn duplicate_positions_step_to_later_value() {
    let c = Curve::from_pairs([(0.0, 0.0), (10.0, 0.0), (10.0, 1.0), (20.0, 1.0)]).unwrap();
    assert_eq!(c.sample(9.999), 0.0);
    assert_eq!(c.sample(10.0), 1.0);
    assert_eq!(c.sample(15.0), 1.0);
}

#[test]
fn nan_position_resolves_to_first_value() {
    assert_eq!(scale_curve().sample(f64::NAN), 1.0);
}

#[test]
fn construction_rejects_empty_and_out_of_order() {
    assert!(Curve::<f64>::new(vec![]).is_err());
    let err = Curve::from_pairs([(5.0, 0.0), (1.0, 1.0)]).unwrap_err();
    assert!(err.to_string().contains("non-decreasing"));
    assert!(Curve::from_pairs([(f64::INFINITY, 0.0)]).is_err());
}

#[test]
fn colors_and_vectors_interpolate() {
    let c = Curve::from_pairs([
        (0.0, Rgba8::new(0, 0, 0, 255)),
        (10.0, Rgba8::new(200, 100, 50, 255)),
    ])
    .unwrap();
    assert_eq!(c.sample(5.0), Rgba8::new(100, 50, 25, 255));

    let v = Curve::from_pairs([(0.0, Vec2::new(0.0, 0.0)), (2.0, Vec2::new(10.0, -4.0))]).unwrap();
    assert_eq!(v.sample(1.0), Vec2::new(5.0, -2.0));
}

#[test]
fn deserializes_with_validation() {
    let c: Curve<f64> = serde_json::from_str(
        r#"{ "points": [ { "at": 0, "value": 1.0 }, { "at": 30, "value": 1.2 } ], "ease": "out_cubic" }"#,
    )
    .unwrap();
    assert_eq!(c.ease(), Ease::OutCubic);
    assert_eq!(c.span(), (0.0, 30.0));

    let bad = serde_json::from_str::<Curve<f64>>(
        r#"{ "points": [ { "at": 3, "value": 1.0 }, { "at": 1, "value": 2.0 } ] }"#,
    );
    assert!(bad.is_err());
}
