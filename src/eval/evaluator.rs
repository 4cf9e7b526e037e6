use rayon::prelude::*;

use crate::{
    animation::anim::SampleCtx,
    animation::curve::Lerp,
    animation::spring::{DEFAULT_SETTLE_THRESHOLD, spring_progress, stretched_progress},
    composition::model::Storyboard,
    foundation::core::{FrameIndex, FrameRange, Rgba8, Vec2},
    foundation::error::{StoryreelError, StoryreelResult},
    foundation::math::lerp_f64,
    scene::model::LayerKind,
    scene::parallax::{layer_offset, layer_scale},
    scene::select::select_scenes,
    transcript::lines::{CaptionLine, line_at},
    transcript::lookup::spoken_weight,
};

/// Resolved state of one frame. Rendering hosts draw directly from this.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameState {
    /// Frame that was resolved (after clamping).
    pub frame: FrameIndex,
    /// Timestamp of the frame in seconds.
    pub time_secs: f64,
    /// Visible layers in painter's order.
    pub layers: Vec<LayerStyle>,
    /// Words inside their display window, in transcript order.
    pub words: Vec<WordStyle>,
    /// Caption line on screen, if any.
    pub caption: Option<CaptionState>,
}

/// Placement of one image layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayerStyle {
    /// Owning scene id.
    pub scene_id: String,
    /// Owning scene index.
    pub scene_index: usize,
    /// Asset reference.
    pub asset_id: String,
    /// Depth plane.
    pub kind: LayerKind,
    /// Effective depth multiplier.
    pub depth: f64,
    /// Scene crossfade opacity.
    pub opacity: f64,
    /// Parallax translation in pixels.
    pub translate: Vec2,
    /// Uniform scale around the canvas center.
    pub scale: f64,
}

/// Appearance of one transcript word.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WordStyle {
    /// Index into the transcript.
    pub index: usize,
    /// Display text.
    pub text: String,
    /// Fade opacity.
    pub opacity: f64,
    /// Pop scale.
    pub scale: f64,
    /// Blended fill color.
    pub color: Rgba8,
    /// Emphasized word.
    pub emphasis: bool,
    /// Inside its spoken window.
    pub spoken: bool,
}

/// The caption line on screen.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CaptionState {
    /// Index of the line.
    pub line_index: usize,
    /// Joined text.
    pub text: String,
    /// Start of the line in seconds.
    pub start: f64,
    /// End of the line in seconds.
    pub end: f64,
}

#[derive(Clone, Debug)]
/// Controls for multi-frame evaluation.
pub struct EvalThreading {
    /// Evaluate frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Minimum frames per rayon task.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for EvalThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 16,
            threads: None,
        }
    }
}

/// Stateless frame resolver.
pub struct Evaluator;

impl Evaluator {
    /// Resolve `frame`. Frames past the end clamp to the last frame.
    #[tracing::instrument(skip(board))]
    pub fn eval_frame(board: &Storyboard, frame: FrameIndex) -> FrameState {
        eval_planned(board, &FramePlan::new(board), frame)
    }

    /// Resolve every frame of `range` in order.
    ///
    /// Parallel and sequential evaluation produce identical output.
    #[tracing::instrument(skip(board, threading))]
    pub fn eval_range(
        board: &Storyboard,
        range: FrameRange,
        threading: &EvalThreading,
    ) -> StoryreelResult<Vec<FrameState>> {
        if range.is_empty() {
            return Err(StoryreelError::validation("eval range must be non-empty"));
        }
        let plan = FramePlan::new(board);
        let frames = range.start.0..range.end.0;
        if !threading.parallel {
            return Ok(frames
                .map(|f| eval_planned(board, &plan, FrameIndex(f)))
                .collect());
        }

        let to_index = |f: u64| {
            usize::try_from(f)
                .map_err(|_| StoryreelError::validation(format!("frame {f} exceeds usize")))
        };
        let (start, end) = (to_index(frames.start)?, to_index(frames.end)?);
        let pool = build_thread_pool(threading.threads)?;
        let min_len = threading.chunk_size.max(1);
        Ok(pool.install(|| {
            (start..end)
                .into_par_iter()
                .with_min_len(min_len)
                .map(|f| eval_planned(board, &plan, FrameIndex(f as u64)))
                .collect()
        }))
    }
}

/// Per-storyboard values that do not depend on the frame.
struct FramePlan {
    lines: Vec<CaptionLine>,
    /// Natural settle frames of the pop spring, when the pop is time-stretched.
    pop_settle_frames: Option<u64>,
}

impl FramePlan {
    fn new(board: &Storyboard) -> Self {
        let style = &board.captions;
        Self {
            lines: board.caption_lines(),
            pop_settle_frames: style
                .pop_frames
                .map(|_| style.pop.settle_frames(board.fps, DEFAULT_SETTLE_THRESHOLD)),
        }
    }
}

fn eval_planned(board: &Storyboard, plan: &FramePlan, frame: FrameIndex) -> FrameState {
    let range = board.frame_range();
    let frame = if range.contains(frame) {
        frame
    } else {
        let clamped = range.clamp(frame);
        tracing::debug!(requested = frame.0, clamped = clamped.0, "frame past end, clamping");
        clamped
    };
    let t = board.time_secs(frame);

    FrameState {
        frame,
        time_secs: t,
        layers: eval_layers(board, t),
        words: eval_words(board, plan, t),
        caption: eval_caption(board, plan, t),
    }
}

fn eval_layers(board: &Storyboard, t: f64) -> Vec<LayerStyle> {
    let mut out = Vec::new();
    for active in select_scenes(&board.scenes, t, board.fps, board.scene_fade_frames) {
        let Some(scene) = board.scenes.get(active.index) else {
            continue;
        };
        let zoom = scene.zoom.sample(SampleCtx {
            fps: board.fps,
            local_frame: board.fps.secs_to_frames(active.elapsed_secs),
        });
        let drift = board.scene_drift(scene);
        out.extend(scene.layers.iter().map(|layer| {
            let depth = layer.depth();
            LayerStyle {
                scene_id: scene.id.clone(),
                scene_index: active.index,
                asset_id: layer.asset_id.clone(),
                kind: layer.kind,
                depth,
                opacity: active.opacity,
                translate: layer_offset(drift, active.elapsed_secs, depth),
                scale: layer_scale(zoom, depth),
            }
        }));
    }
    out
}

fn eval_words(board: &Storyboard, plan: &FramePlan, t: f64) -> Vec<WordStyle> {
    let style = &board.captions;
    let margin = board.word_fade_secs();
    board
        .transcript
        .active_units(t, margin)
        .into_iter()
        .filter_map(|active| {
            let unit = board.transcript.get(active.index)?;
            let (rest_scale, highlight) = if unit.emphasis {
                (style.emphasis_scale, style.emphasis_color)
            } else {
                (1.0, style.highlight_color)
            };
            let elapsed = board.fps.secs_to_frames(t - unit.start);
            let pop = match (style.pop_frames, plan.pop_settle_frames) {
                (Some(d), Some(natural)) => {
                    stretched_progress(elapsed, board.fps, &style.pop, d, natural)
                }
                _ => spring_progress(elapsed, board.fps, &style.pop, None),
            };
            Some(WordStyle {
                index: active.index,
                text: unit.text.clone(),
                opacity: active.opacity,
                scale: lerp_f64(style.enter_scale, rest_scale, pop),
                color: Rgba8::lerp(&style.base_color, &highlight, spoken_weight(unit, t, margin)),
                emphasis: unit.emphasis,
                spoken: active.spoken,
            })
        })
        .collect()
}

fn eval_caption(board: &Storyboard, plan: &FramePlan, t: f64) -> Option<CaptionState> {
    let idx = line_at(&plan.lines, t, board.captions.hold_secs)?;
    let line = plan.lines.get(idx)?;
    Some(CaptionState {
        line_index: idx,
        text: board.transcript.line_text(line),
        start: line.start,
        end: line.end,
    })
}

fn build_thread_pool(threads: Option<usize>) -> StoryreelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(StoryreelError::validation(
            "eval threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| StoryreelError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
