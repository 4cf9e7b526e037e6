use crate::{
    composition::model::{CaptionStyle, Storyboard},
    foundation::core::{Canvas, Fps, Vec2},
    foundation::error::StoryreelResult,
    scene::model::{Layer, SceneWindow},
    scene::parallax::ParallaxConfig,
    transcript::model::Transcript,
};

/// In-code construction of a [`Storyboard`].
pub struct StoryboardBuilder {
    fps: Fps,
    canvas: Canvas,
    duration: u64,
    scene_fade_frames: u32,
    parallax: ParallaxConfig,
    scenes: Vec<SceneWindow>,
    transcript: Transcript,
    captions: CaptionStyle,
}

impl StoryboardBuilder {
    /// Start a storyboard of `duration` frames.
    pub fn new(fps: Fps, duration: u64) -> Self {
        Self {
            fps,
            canvas: Canvas::default(),
            duration,
            scene_fade_frames: 15,
            parallax: ParallaxConfig::default(),
            scenes: Vec::new(),
            transcript: Transcript::default(),
            captions: CaptionStyle::default(),
        }
    }

    /// Output canvas size.
    pub fn canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    /// Default scene crossfade margin in frames.
    pub fn scene_fade_frames(mut self, frames: u32) -> Self {
        self.scene_fade_frames = frames;
        self
    }

    /// Default parallax drift.
    pub fn drift(mut self, drift: Vec2) -> Self {
        self.parallax.drift = drift;
        self
    }

    /// Append a scene.
    pub fn scene(mut self, scene: SceneWindow) -> Self {
        self.scenes.push(scene);
        self
    }

    /// Narration timing.
    pub fn transcript(mut self, transcript: Transcript) -> Self {
        self.transcript = transcript;
        self
    }

    /// Word and caption styling.
    pub fn captions(mut self, captions: CaptionStyle) -> Self {
        self.captions = captions;
        self
    }

    /// Validate and return the storyboard.
    pub fn build(self) -> StoryreelResult<Storyboard> {
        let board = Storyboard {
            fps: self.fps,
            canvas: self.canvas,
            duration: self.duration,
            scene_fade_frames: self.scene_fade_frames,
            parallax: self.parallax,
            scenes: self.scenes,
            transcript: self.transcript,
            transcript_file: None,
            captions: self.captions,
        };
        board.validate()?;
        Ok(board)
    }
}

/// A scene with the usual three-plane layer stack.
pub fn parallax_scene(
    id: impl Into<String>,
    start: f64,
    end: f64,
    background: impl Into<String>,
    midground: impl Into<String>,
    foreground: impl Into<String>,
) -> SceneWindow {
    SceneWindow::new(id, start, end)
        .layer(Layer::background(background))
        .layer(Layer::midground(midground))
        .layer(Layer::foreground(foreground))
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
