use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    animation::spring::SpringConfig,
    foundation::core::{Canvas, FrameIndex, FrameRange, Fps, Rgba8, Vec2},
    foundation::error::{StoryreelError, StoryreelResult},
    scene::model::SceneWindow,
    scene::parallax::ParallaxConfig,
    transcript::lines::{CaptionLine, LineBreaking},
    transcript::model::Transcript,
};

/// Word and caption styling shared by every transcript unit.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptionStyle {
    /// Word fade margin in frames.
    pub fade_frames: u32,
    /// Color of words that are not being spoken.
    pub base_color: Rgba8,
    /// Color of the word being spoken.
    pub highlight_color: Rgba8,
    /// Highlight color of emphasized words.
    pub emphasis_color: Rgba8,
    /// Scale a word pops in from.
    pub enter_scale: f64,
    /// Resting scale of emphasized words (plain words rest at 1).
    pub emphasis_scale: f64,
    /// Spring driving the pop, activated at the word's start.
    pub pop: SpringConfig,
    /// Settle the pop in exactly this many frames instead of the natural response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pop_frames: Option<f64>,
    /// Grouping of words into caption lines.
    pub line_breaking: LineBreaking,
    /// Seconds a caption line stays up after its last word ends.
    pub hold_secs: f64,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            fade_frames: 5,
            base_color: Rgba8::WHITE,
            highlight_color: Rgba8::new(255, 213, 74, 255),
            emphasis_color: Rgba8::new(255, 122, 69, 255),
            enter_scale: 0.85,
            emphasis_scale: 1.12,
            pop: SpringConfig {
                stiffness: 180.0,
                damping: 14.0,
                ..SpringConfig::default()
            },
            pop_frames: None,
            line_breaking: LineBreaking::default(),
            hold_secs: 0.4,
        }
    }
}

impl CaptionStyle {
    /// Validate scales, timing and the pop spring.
    pub fn validate(&self) -> StoryreelResult<()> {
        for (name, v) in [
            ("enter_scale", self.enter_scale),
            ("emphasis_scale", self.emphasis_scale),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(StoryreelError::validation(format!(
                    "captions {name} must be finite and > 0"
                )));
            }
        }
        if !(self.hold_secs.is_finite() && self.hold_secs >= 0.0) {
            return Err(StoryreelError::validation(
                "captions hold_secs must be finite and >= 0",
            ));
        }
        if let Some(frames) = self.pop_frames
            && !(frames.is_finite() && frames >= 0.0)
        {
            return Err(StoryreelError::validation(
                "captions pop_frames must be finite and >= 0",
            ));
        }
        self.pop.validate()?;
        self.line_breaking.validate()
    }
}

fn default_scene_fade_frames() -> u32 {
    15
}

/// Static configuration of one narrated slideshow.
///
/// This is the JSON-facing table consumed by [`crate::Evaluator`]. It is never mutated while
/// frames are resolved.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Storyboard {
    /// Frame rate.
    pub fps: Fps,
    /// Output size; informational for the rendering host.
    #[serde(default)]
    pub canvas: Canvas,
    /// Total length in frames.
    pub duration: u64,
    /// Crossfade margin for scenes that do not set their own.
    #[serde(default = "default_scene_fade_frames")]
    pub scene_fade_frames: u32,
    /// Parallax tuning.
    #[serde(default)]
    pub parallax: ParallaxConfig,
    /// Scene windows ordered by start.
    pub scenes: Vec<SceneWindow>,
    /// Narration timing.
    #[serde(default)]
    pub transcript: Transcript,
    /// Transcript text file, relative to the storyboard JSON. Loaded by [`Storyboard::from_path`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_file: Option<String>,
    /// Word and caption styling.
    #[serde(default)]
    pub captions: CaptionStyle,
}

impl Storyboard {
    /// Parse a storyboard from a JSON reader.
    ///
    /// `transcript_file` is left unresolved; use [`Storyboard::load_transcript_file`] or
    /// [`Storyboard::from_path`].
    pub fn from_reader<R: std::io::Read>(r: R) -> StoryreelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| StoryreelError::serde(format!("parse storyboard JSON: {e}")))
    }

    /// Parse a storyboard from a JSON string.
    pub fn from_json_str(s: &str) -> StoryreelResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| StoryreelError::serde(format!("parse storyboard JSON: {e}")))
    }

    /// Parse a storyboard JSON file and load its `transcript_file`, if any.
    pub fn from_path(path: impl AsRef<Path>) -> StoryreelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StoryreelError::validation(format!("open storyboard JSON '{}': {e}", path.display()))
        })?;
        let mut board = Self::from_reader(BufReader::new(f))?;
        board.load_transcript_file(path.parent().unwrap_or_else(|| Path::new(".")))?;
        Ok(board)
    }

    /// Replace the inline transcript with `transcript_file`, resolved against `base_dir`.
    ///
    /// Does nothing when no file is set. A storyboard may not carry both.
    pub fn load_transcript_file(&mut self, base_dir: &Path) -> StoryreelResult<()> {
        let Some(file) = &self.transcript_file else {
            return Ok(());
        };
        if !self.transcript.is_empty() {
            return Err(StoryreelError::validation(
                "storyboard sets both 'transcript' and 'transcript_file'",
            ));
        }
        let path = base_dir.join(file);
        tracing::debug!(path = %path.display(), "loading transcript file");
        self.transcript = Transcript::from_path(&path)?;
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> StoryreelResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StoryreelError::serde(format!("serialize storyboard JSON: {e}")))
    }

    /// Check every timing table and tuning parameter.
    pub fn validate(&self) -> StoryreelResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(StoryreelError::validation("canvas width/height must be > 0"));
        }
        if self.duration == 0 {
            return Err(StoryreelError::validation("duration must be > 0 frames"));
        }
        self.parallax.validate()?;

        let mut ids = BTreeSet::new();
        for scene in &self.scenes {
            scene.validate()?;
            if !ids.insert(scene.id.as_str()) {
                return Err(StoryreelError::validation(format!(
                    "duplicate scene id '{}'",
                    scene.id
                )));
            }
        }
        if let Some(w) = self.scenes.windows(2).find(|w| w[1].start < w[0].start) {
            return Err(StoryreelError::validation(format!(
                "scenes must be ordered by start ('{}' at {} follows '{}' at {})",
                w[1].id, w[1].start, w[0].id, w[0].start
            )));
        }
        if let Some(w) = self.scenes.windows(2).find(|w| w[1].end < w[0].end) {
            return Err(StoryreelError::validation(format!(
                "scene '{}' ends at {} before '{}' ends at {}",
                w[1].id, w[1].end, w[0].id, w[0].end
            )));
        }

        self.captions.validate()
    }

    /// Total length in frames.
    pub fn duration_frames(&self) -> u64 {
        self.duration
    }

    /// Every frame of the storyboard.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.duration),
        }
    }

    /// Last valid frame.
    pub fn last_frame(&self) -> FrameIndex {
        FrameIndex(self.duration.saturating_sub(1))
    }

    /// Timestamp of `frame` in seconds.
    pub fn time_secs(&self, frame: FrameIndex) -> f64 {
        self.fps.frames_to_secs(frame.0)
    }

    /// Word fade margin in seconds.
    pub fn word_fade_secs(&self) -> f64 {
        self.fps.frames_to_secs(u64::from(self.captions.fade_frames))
    }

    /// Parallax drift of `scene`.
    pub fn scene_drift(&self, scene: &SceneWindow) -> Vec2 {
        scene.drift.unwrap_or(self.parallax.drift)
    }

    /// Caption lines of the transcript under the configured line breaking.
    pub fn caption_lines(&self) -> Vec<CaptionLine> {
        self.transcript.caption_lines(&self.captions.line_breaking)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
