use crate::{
    animation::curve::{Curve, Lerp},
    animation::spring::Spring,
    foundation::core::Fps,
    foundation::error::{StoryreelError, StoryreelResult},
};

#[derive(Clone, Copy, Debug)]
/// Sampling context provided to animation evaluators.
pub struct SampleCtx {
    /// Composition frame rate.
    pub fps: Fps,
    /// Frame position relative to the owner's start (scene or word). May be fractional or
    /// negative while the owner is fading in.
    pub local_frame: f64,
}

/// Animated property value, loadable from storyboard JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anim<T> {
    /// Fixed value.
    Constant(T),
    /// Breakpoint curve over local frames.
    Curve(Curve<T>),
    /// Spring between two values.
    Spring(Spring<T>),
    /// Shift another animation later by `frames`.
    Delay {
        /// Inner animation.
        inner: Box<Anim<T>>,
        /// Delay amount in frames.
        frames: f64,
    },
}

impl<T> Anim<T>
where
    T: Lerp + Clone,
{
    /// Build a constant animation that always returns `value`.
    pub fn constant(value: T) -> Self {
        Self::Constant(value)
    }

    /// Wrap `self` so it starts `frames` later.
    pub fn delayed(self, frames: f64) -> Self {
        Self::Delay {
            inner: Box::new(self),
            frames,
        }
    }

    /// Sample the value at the given context.
    pub fn sample(&self, ctx: SampleCtx) -> T {
        match self {
            Self::Constant(v) => v.clone(),
            Self::Curve(curve) => curve.sample(ctx.local_frame),
            Self::Spring(spring) => spring.sample(ctx.local_frame, ctx.fps),
            Self::Delay { inner, frames } => inner.sample(SampleCtx {
                local_frame: ctx.local_frame - frames,
                ..ctx
            }),
        }
    }

    /// Validate parameters that curve construction does not already guarantee.
    pub fn validate(&self) -> StoryreelResult<()> {
        match self {
            Self::Constant(_) => Ok(()),
            Self::Curve(curve) => curve.ease().validate(),
            Self::Spring(spring) => spring.validate(),
            Self::Delay { inner, frames } => {
                if !frames.is_finite() {
                    return Err(StoryreelError::animation("delay frames must be finite"));
                }
                inner.validate()
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
