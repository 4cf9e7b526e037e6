use crate::{
    animation::anim::Anim,
    animation::ease::Ease,
    foundation::core::{Fps, Vec2},
    foundation::error::{StoryreelError, StoryreelResult},
};

/// Depth plane of a parallax layer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Farthest plane; moves least.
    Background,
    /// Middle plane.
    Midground,
    /// Nearest plane; moves most.
    Foreground,
}

impl LayerKind {
    /// Depth multiplier used when a layer does not set its own.
    pub fn default_depth(self) -> f64 {
        match self {
            Self::Background => 0.2,
            Self::Midground => 0.5,
            Self::Foreground => 1.0,
        }
    }
}

/// One image layer of a scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    /// Depth plane.
    pub kind: LayerKind,
    /// Opaque asset reference resolved by the rendering host.
    pub asset_id: String,
    /// Parallax multiplier; falls back to [`LayerKind::default_depth`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_factor: Option<f64>,
}

impl Layer {
    /// Layer with the kind's default depth.
    pub fn new(kind: LayerKind, asset_id: impl Into<String>) -> Self {
        Self {
            kind,
            asset_id: asset_id.into(),
            depth_factor: None,
        }
    }

    /// Background layer.
    pub fn background(asset_id: impl Into<String>) -> Self {
        Self::new(LayerKind::Background, asset_id)
    }

    /// Midground layer.
    pub fn midground(asset_id: impl Into<String>) -> Self {
        Self::new(LayerKind::Midground, asset_id)
    }

    /// Foreground layer.
    pub fn foreground(asset_id: impl Into<String>) -> Self {
        Self::new(LayerKind::Foreground, asset_id)
    }

    /// Override the depth multiplier.
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth_factor = Some(depth);
        self
    }

    /// Effective depth multiplier.
    pub fn depth(&self) -> f64 {
        self.depth_factor
            .unwrap_or_else(|| self.kind.default_depth())
    }
}

/// A time window of the storyboard showing a stack of layers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneWindow {
    /// Scene identifier, unique within a storyboard.
    pub id: String,
    /// Start in seconds.
    pub start: f64,
    /// End in seconds (`>= start`).
    pub end: f64,
    /// Layers in painter's order.
    pub layers: Vec<Layer>,
    /// Crossfade margin into this scene, in frames. Falls back to the storyboard default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_frames: Option<u32>,
    /// Ease of the incoming crossfade.
    #[serde(default)]
    pub fade_ease: Ease,
    /// Camera zoom sampled in scene-local frames; scaled per layer by depth.
    #[serde(default = "default_zoom")]
    pub zoom: Anim<f64>,
    /// Parallax drift override (pixels per second at depth 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift: Option<Vec2>,
}

fn default_zoom() -> Anim<f64> {
    Anim::Constant(1.0)
}

impl SceneWindow {
    /// Empty scene covering `[start, end]` seconds.
    pub fn new(id: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            layers: Vec::new(),
            fade_frames: None,
            fade_ease: Ease::Linear,
            zoom: default_zoom(),
            drift: None,
        }
    }

    /// Append a layer.
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Set the incoming crossfade margin in frames.
    pub fn fade_frames(mut self, frames: u32) -> Self {
        self.fade_frames = Some(frames);
        self
    }

    /// Set the incoming crossfade ease.
    pub fn fade_ease(mut self, ease: Ease) -> Self {
        self.fade_ease = ease;
        self
    }

    /// Set the camera zoom animation.
    pub fn zoom(mut self, zoom: Anim<f64>) -> Self {
        self.zoom = zoom;
        self
    }

    /// Override the parallax drift for this scene.
    pub fn drift(mut self, drift: Vec2) -> Self {
        self.drift = Some(drift);
        self
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Incoming crossfade margin in seconds.
    pub fn fade_secs(&self, fps: Fps, default_frames: u32) -> f64 {
        fps.frames_to_secs(u64::from(self.fade_frames.unwrap_or(default_frames)))
    }

    /// Validate a single scene's timing and layers.
    pub fn validate(&self) -> StoryreelResult<()> {
        if !(self.start.is_finite() && self.end.is_finite()) {
            return Err(StoryreelError::validation(format!(
                "scene '{}' has non-finite times",
                self.id
            )));
        }
        if self.start > self.end {
            return Err(StoryreelError::validation(format!(
                "scene '{}' ends before it starts ({} > {})",
                self.id, self.start, self.end
            )));
        }
        for layer in &self.layers {
            let d = layer.depth();
            if !(d.is_finite() && d >= 0.0) {
                return Err(StoryreelError::validation(format!(
                    "scene '{}' layer '{}' depth_factor must be finite and >= 0",
                    self.id, layer.asset_id
                )));
            }
        }
        if let Some(v) = self.drift
            && !(v.x.is_finite() && v.y.is_finite())
        {
            return Err(StoryreelError::validation(format!(
                "scene '{}' drift must be finite",
                self.id
            )));
        }
        self.fade_ease.validate()?;
        self.zoom.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
