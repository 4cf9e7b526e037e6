use crate::{
    animation::curve::{Breakpoint, Extrapolate, resolve},
    animation::ease::Ease,
    foundation::math::{clamp01, inverse_lerp},
    transcript::model::{TimedText, Transcript},
};

/// A transcript unit whose display window contains the queried position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ActiveUnit {
    /// Index into [`Transcript::units`].
    pub index: usize,
    /// Fade opacity in `[0, 1]`.
    pub opacity: f64,
    /// `true` while the position lies inside `[start, end]`.
    pub spoken: bool,
    /// Progress through the spoken window, clamped to `[0, 1]`.
    pub progress: f64,
}

/// Fade opacity of `unit` at `t` seconds with a fade margin of `margin` seconds.
///
/// Opacity ramps 0 -> 1 over `[start, start + margin]`, holds, and ramps 1 -> 0 over
/// `[end, end + margin]`. For units shorter than the margin the ramp-in ends at the unit
/// midpoint, so the midpoint is always fully opaque. Outside the ramps the unit is
/// transparent; in particular it is 0 outside `[start - margin, end + margin]`.
pub fn unit_opacity(unit: &TimedText, t: f64, margin: f64) -> f64 {
    let m = if margin.is_nan() { 0.0 } else { margin.max(0.0) };
    if m == 0.0 {
        return if unit.start <= t && t <= unit.end { 1.0 } else { 0.0 };
    }
    let fade_in_end = (unit.start + m).min(unit.midpoint());
    let points = [
        Breakpoint::new(unit.start, 0.0),
        Breakpoint::new(fade_in_end, 1.0),
        Breakpoint::new(unit.end, 1.0),
        Breakpoint::new(unit.end + m, 0.0),
    ];
    let v = resolve(
        &points,
        t,
        Ease::Linear,
        Extrapolate::Clamp,
        Extrapolate::Clamp,
    );
    clamp01(v.unwrap_or(0.0))
}

/// How strongly `unit` is being spoken at `t`, for highlight blending.
///
/// Ramps 0 -> 1 over `[start, start + margin]` and back to 0 over `[end - margin, end]`, both
/// ramps meeting at the midpoint for short units. Zero outside `[start, end]`.
pub fn spoken_weight(unit: &TimedText, t: f64, margin: f64) -> f64 {
    let m = if margin.is_nan() { 0.0 } else { margin.max(0.0) };
    if m == 0.0 || unit.end <= unit.start {
        return if unit.start <= t && t <= unit.end { 1.0 } else { 0.0 };
    }
    let mid = unit.midpoint();
    let points = [
        Breakpoint::new(unit.start, 0.0),
        Breakpoint::new((unit.start + m).min(mid), 1.0),
        Breakpoint::new((unit.end - m).max(mid), 1.0),
        Breakpoint::new(unit.end, 0.0),
    ];
    let v = resolve(
        &points,
        t,
        Ease::Linear,
        Extrapolate::Clamp,
        Extrapolate::Clamp,
    );
    clamp01(v.unwrap_or(0.0))
}

impl Transcript {
    /// Units whose window `[start - margin, end + margin]` contains `t`, in transcript order.
    ///
    /// Units in their lead-in margin are reported with zero opacity rather than dropped.
    pub fn active_units(&self, t: f64, margin: f64) -> Vec<ActiveUnit> {
        let m = if margin.is_nan() { 0.0 } else { margin.max(0.0) };
        // Units are sorted by start, so nothing past this index can be active yet.
        let upper = self.units().partition_point(|u| u.start - m <= t);
        self.units()[..upper]
            .iter()
            .enumerate()
            .filter(|(_, u)| t <= u.end + m)
            .map(|(index, u)| ActiveUnit {
                index,
                opacity: unit_opacity(u, t, m),
                spoken: u.start <= t && t <= u.end,
                progress: clamp01(inverse_lerp(u.start, u.end, t)),
            })
            .collect()
    }

    /// Index of the unit being spoken at `t`: the latest-starting unit with `start <= t <= end`.
    pub fn spoken_at(&self, t: f64) -> Option<usize> {
        let upper = self.units().partition_point(|u| u.start <= t);
        self.units()[..upper].iter().rposition(|u| t <= u.end)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/lookup.rs"]
mod tests;
