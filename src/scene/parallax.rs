use crate::foundation::{
    core::Vec2,
    error::{StoryreelError, StoryreelResult},
};

/// Storyboard-wide parallax tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Drift in pixels per second at depth 1. Scenes may override it.
    pub drift: Vec2,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            drift: Vec2::new(-24.0, 0.0),
        }
    }
}

impl ParallaxConfig {
    /// Reject non-finite drift.
    pub fn validate(&self) -> StoryreelResult<()> {
        if !(self.drift.x.is_finite() && self.drift.y.is_finite()) {
            return Err(StoryreelError::validation("parallax drift must be finite"));
        }
        Ok(())
    }
}

/// Translation of a layer `elapsed_secs` into its scene.
///
/// `drift * elapsed * depth`: background layers (small depth) move least. Negative elapsed
/// time (the incoming half of a crossfade) continues the motion backwards so the layer does
/// not jump at the scene start.
pub fn layer_offset(drift: Vec2, elapsed_secs: f64, depth: f64) -> Vec2 {
    drift * (elapsed_secs * depth)
}

/// Scale of a layer for a camera `zoom`; depth 0 ignores the zoom, depth 1 follows it fully.
pub fn layer_scale(zoom: f64, depth: f64) -> f64 {
    1.0 + (zoom - 1.0) * depth
}

#[cfg(test)]
#[path = "../../tests/unit/scene/parallax.rs"]
mod tests;
