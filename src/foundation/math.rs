/// Normalized position of `x` between `a` and `b`. Not clamped.
pub(crate) fn inverse_lerp(a: f64, b: f64, x: f64) -> f64 {
    let span = b - a;
    if span == 0.0 {
        return 0.0;
    }
    (x - a) / span
}

pub(crate) fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Lerp between two channel values and round back into `u8` range.
pub(crate) fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
    lerp_f64(f64::from(a), f64::from(b), t)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
