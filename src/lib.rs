//! Storyreel resolves the per-frame state of narrated parallax slideshows.
//!
//! Everything is a pure function of the frame number and a static [`Storyboard`]:
//!
//! - Load a [`Storyboard`] from JSON (or build one with [`StoryboardBuilder`])
//! - Resolve a single frame with [`Evaluator::eval_frame`]
//! - Resolve a range, optionally in parallel, with [`Evaluator::eval_range`]
//!
//! The building blocks are public too: breakpoint [`Curve`]s with [`Ease`] and boundary
//! policies, [`Spring`] responses, transcript parsing and word timing lookup, and scene
//! crossfade selection with parallax offsets.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod composition;
pub(crate) mod eval;
pub(crate) mod scene;
pub(crate) mod transcript;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8, Vec2};
pub use crate::foundation::error::{StoryreelError, StoryreelResult};

pub use crate::animation::anim::{Anim, SampleCtx};
pub use crate::animation::curve::{Breakpoint, Curve, Extrapolate, Lerp};
pub use crate::animation::ease::Ease;
pub use crate::animation::spring::{
    DEFAULT_SETTLE_THRESHOLD, Spring, SpringConfig, spring_progress,
};
pub use crate::composition::dsl::{StoryboardBuilder, parallax_scene};
pub use crate::composition::model::{CaptionStyle, Storyboard};
pub use crate::eval::evaluator::{
    CaptionState, EvalThreading, Evaluator, FrameState, LayerStyle, WordStyle,
};
pub use crate::scene::model::{Layer, LayerKind, SceneWindow};
pub use crate::scene::parallax::{ParallaxConfig, layer_offset, layer_scale};
pub use crate::scene::select::{ActiveScene, Crossfade, scene_opacity, select_scenes};
pub use crate::transcript::lines::{CaptionLine, LineBreaking, line_at};
pub use crate::transcript::lookup::{ActiveUnit, spoken_weight, unit_opacity};
pub use crate::transcript::model::{TimedText, Transcript};
pub use crate::transcript::parse::parse_transcript;
