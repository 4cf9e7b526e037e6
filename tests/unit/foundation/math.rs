use super::*;

#[test]
fn inverse_lerp_handles_degenerate_span() {
    assert_eq!(inverse_lerp(2.0, 2.0, 5.0), 0.0);
    assert_eq!(inverse_lerp(0.0, 10.0, 2.5), 0.25);
    assert_eq!(inverse_lerp(0.0, 10.0, 20.0), 2.0);
}

#[test]
fn lerp_u8_rounds_and_saturates() {
    assert_eq!(lerp_u8(0, 255, 0.5), 128);
    assert_eq!(lerp_u8(0, 255, 2.0), 255);
    assert_eq!(lerp_u8(10, 200, -1.0), 0);
}

#[test]
fn clamp01_maps_nan_to_zero() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(1.5), 1.0);
    assert_eq!(clamp01(-0.5), 0.0);
}
