use crate::{
    animation::ease::Ease,
    foundation::core::{Rgba8, Vec2},
    foundation::error::{StoryreelError, StoryreelResult},
    foundation::math::{inverse_lerp, lerp_f64, lerp_u8},
};

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t`.
    ///
    /// `t` is usually in `[0, 1]`; values outside that range come from extrapolation and
    /// spring overshoot, and implementations continue the line (or saturate, for colors).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        lerp_f64(*a, *b, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(lerp_f64(a.x, b.x, t), lerp_f64(a.y, b.y, t))
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// What a curve returns for positions outside its first/last breakpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Hold the nearest endpoint value.
    #[default]
    Clamp,
    /// Continue the boundary segment linearly.
    Extend,
}

/// One `(position, value)` anchor of a curve.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Breakpoint<T> {
    /// Input position (frames or seconds, chosen by the caller).
    pub at: f64,
    /// Output value at `at`.
    pub value: T,
}

impl<T> Breakpoint<T> {
    /// Build a breakpoint.
    pub fn new(at: f64, value: T) -> Self {
        Self { at, value }
    }
}

/// A keyframe breakpoint set with an easing rule and boundary policies.
///
/// Construction validates that positions are finite and non-decreasing, so [`Curve::sample`]
/// is total. Repeated positions are allowed and produce an instantaneous step; sampling
/// exactly at a repeated position yields the value of the last breakpoint sharing it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "CurveDef<T>")]
pub struct Curve<T> {
    points: Vec<Breakpoint<T>>,
    ease: Ease,
    left: Extrapolate,
    right: Extrapolate,
}

#[derive(serde::Deserialize)]
struct CurveDef<T> {
    points: Vec<Breakpoint<T>>,
    #[serde(default)]
    ease: Ease,
    #[serde(default)]
    left: Extrapolate,
    #[serde(default)]
    right: Extrapolate,
}

impl<T> TryFrom<CurveDef<T>> for Curve<T> {
    type Error = StoryreelError;

    fn try_from(def: CurveDef<T>) -> StoryreelResult<Self> {
        def.ease.validate()?;
        Ok(Self::new(def.points)?
            .with_ease(def.ease)
            .with_extrapolation(def.left, def.right))
    }
}

impl<T> Curve<T> {
    /// Build a linear, clamped curve from breakpoints.
    pub fn new(points: Vec<Breakpoint<T>>) -> StoryreelResult<Self> {
        if points.is_empty() {
            return Err(StoryreelError::animation(
                "curve must have at least one breakpoint",
            ));
        }
        if let Some(bad) = points.iter().position(|p| !p.at.is_finite()) {
            return Err(StoryreelError::animation(format!(
                "curve breakpoint {bad} has a non-finite position"
            )));
        }
        if let Some(i) = points.windows(2).position(|w| w[0].at > w[1].at) {
            return Err(StoryreelError::animation(format!(
                "curve breakpoints must be non-decreasing (breakpoint {} at {} follows {})",
                i + 1,
                points[i + 1].at,
                points[i].at
            )));
        }
        Ok(Self {
            points,
            ease: Ease::Linear,
            left: Extrapolate::Clamp,
            right: Extrapolate::Clamp,
        })
    }

    /// Build a curve from `(position, value)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, T)>) -> StoryreelResult<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(at, value)| Breakpoint { at, value })
                .collect(),
        )
    }

    /// Ease applied to the normalized progress inside every segment.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Boundary policies before the first and after the last breakpoint.
    pub fn with_extrapolation(mut self, left: Extrapolate, right: Extrapolate) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    /// Breakpoints in position order.
    pub fn points(&self) -> &[Breakpoint<T>] {
        &self.points
    }

    /// Ease applied inside segments.
    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Positions of the first and last breakpoint.
    pub fn span(&self) -> (f64, f64) {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first.at, last.at),
            _ => (0.0, 0.0),
        }
    }
}

impl<T> Curve<T>
where
    T: Lerp + Clone,
{
    /// Resolve the curve value at position `p`.
    pub fn sample(&self, p: f64) -> T {
        match resolve(&self.points, p, self.ease, self.left, self.right) {
            Some(v) => v,
            None => unreachable!("Curve::new rejects empty breakpoint sets"),
        }
    }
}

/// Resolve `p` against a breakpoint slice. Returns `None` only for an empty slice.
///
/// Positions must be non-decreasing; callers inside the crate build the slice from
/// already-ordered anchors. A NaN position resolves like a position before the first
/// breakpoint under the clamp policy.
pub(crate) fn resolve<T>(
    points: &[Breakpoint<T>],
    p: f64,
    ease: Ease,
    left: Extrapolate,
    right: Extrapolate,
) -> Option<T>
where
    T: Lerp + Clone,
{
    let first = points.first()?;
    let last = points.last()?;

    if p.is_nan() {
        return Some(first.value.clone());
    }
    if p < first.at {
        return Some(match left {
            Extrapolate::Clamp => first.value.clone(),
            Extrapolate::Extend => extend(points.first(), points.get(1), p, &first.value),
        });
    }
    if p > last.at {
        let n = points.len();
        return Some(match right {
            Extrapolate::Clamp => last.value.clone(),
            Extrapolate::Extend => extend(
                n.checked_sub(2).and_then(|i| points.get(i)),
                points.get(n - 1),
                p,
                &last.value,
            ),
        });
    }

    // First index whose position is strictly after `p`.
    let idx = points.partition_point(|b| b.at <= p);
    let (Some(a), Some(b)) = (idx.checked_sub(1).and_then(|i| points.get(i)), points.get(idx))
    else {
        return Some(last.value.clone());
    };
    let t = inverse_lerp(a.at, b.at, p);
    Some(T::lerp(&a.value, &b.value, ease.apply(t)))
}

fn extend<T>(a: Option<&Breakpoint<T>>, b: Option<&Breakpoint<T>>, p: f64, fallback: &T) -> T
where
    T: Lerp + Clone,
{
    match (a, b) {
        (Some(a), Some(b)) if b.at > a.at => {
            T::lerp(&a.value, &b.value, inverse_lerp(a.at, b.at, p))
        }
        _ => fallback.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
