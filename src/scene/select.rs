use crate::{
    animation::curve::{Breakpoint, Extrapolate, resolve},
    animation::ease::Ease,
    foundation::core::Fps,
    scene::model::SceneWindow,
};

/// A scene contributing to the current frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ActiveScene {
    /// Index into the scene list.
    pub index: usize,
    /// Crossfade opacity in `(0, 1]`.
    pub opacity: f64,
    /// Seconds since the scene's start (negative during its incoming crossfade).
    pub elapsed_secs: f64,
}

/// Crossfade between two adjacent scenes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossfade {
    /// Center of the transition in seconds.
    pub center: f64,
    /// Half of the transition length in seconds.
    pub half_width: f64,
    /// Ease applied to the incoming weight.
    pub ease: Ease,
}

impl Crossfade {
    /// Transition between `prev` and `next`, using `next`'s fade margin.
    ///
    /// The center is the midpoint of `prev.end` and `next.start`; for abutting scenes that is
    /// the shared boundary. Overlapping windows widen the transition to cover the overlap.
    pub fn between(prev: &SceneWindow, next: &SceneWindow, fps: Fps, default_frames: u32) -> Self {
        let center = 0.5 * (prev.end + next.start);
        let overlap = (prev.end - next.start).max(0.0);
        Self {
            center,
            half_width: next.fade_secs(fps, default_frames).max(0.5 * overlap),
            ease: next.fade_ease,
        }
    }

    /// Transition into `scenes[index]` from `scenes[index - 1]`, narrowed so it cannot overlap
    /// the transitions on either side. `None` for the first scene or an out-of-range index.
    ///
    /// Each side is capped at half the distance to the neighbouring transition's center, so at
    /// most two scenes are ever visible and their weights stay complementary even when a scene
    /// is shorter than its fade margins.
    pub fn at_boundary(
        scenes: &[SceneWindow],
        index: usize,
        fps: Fps,
        default_frames: u32,
    ) -> Option<Self> {
        let prev = scenes.get(index.checked_sub(1)?)?;
        let next = scenes.get(index)?;
        let mut fade = Self::between(prev, next, fps, default_frames);
        let neighbour_centers = [
            index.checked_sub(1).and_then(|i| boundary_center(scenes, i)),
            boundary_center(scenes, index + 1),
        ];
        for c in neighbour_centers.into_iter().flatten() {
            let room = 0.5 * (fade.center - c).abs();
            fade.half_width = fade.half_width.min(room);
        }
        Some(fade)
    }

    /// Weight of the incoming scene at `t`; the outgoing scene gets `1 - weight`.
    ///
    /// A zero-width transition is a hard cut that splits evenly at the exact boundary.
    pub fn incoming_weight(&self, t: f64) -> f64 {
        if self.half_width <= 0.0 {
            return if t < self.center {
                0.0
            } else if t > self.center {
                1.0
            } else {
                0.5
            };
        }
        let points = [
            Breakpoint::new(self.center - self.half_width, 0.0),
            Breakpoint::new(self.center + self.half_width, 1.0),
        ];
        resolve(&points, t, self.ease, Extrapolate::Clamp, Extrapolate::Clamp).unwrap_or(0.0)
    }
}

/// Center of the transition into `scenes[index]`.
fn boundary_center(scenes: &[SceneWindow], index: usize) -> Option<f64> {
    let prev = scenes.get(index.checked_sub(1)?)?;
    let next = scenes.get(index)?;
    Some(0.5 * (prev.end + next.start))
}

/// Opacity of scene `index` at `t` seconds.
///
/// Positions before the first scene or after the last resolve to that scene.
pub fn scene_opacity(
    scenes: &[SceneWindow],
    index: usize,
    t: f64,
    fps: Fps,
    default_fade_frames: u32,
) -> f64 {
    if index >= scenes.len() {
        return 0.0;
    }
    let fade_in = Crossfade::at_boundary(scenes, index, fps, default_fade_frames)
        .map_or(1.0, |fade| fade.incoming_weight(t));
    let fade_out = Crossfade::at_boundary(scenes, index + 1, fps, default_fade_frames)
        .map_or(1.0, |fade| 1.0 - fade.incoming_weight(t));
    fade_in * fade_out
}

/// Scenes visible at `t` seconds, in painter's order (incoming scenes on top).
pub fn select_scenes(
    scenes: &[SceneWindow],
    t: f64,
    fps: Fps,
    default_fade_frames: u32,
) -> Vec<ActiveScene> {
    scenes
        .iter()
        .enumerate()
        .filter_map(|(index, scene)| {
            let opacity = scene_opacity(scenes, index, t, fps, default_fade_frames);
            (opacity > 0.0).then_some(ActiveScene {
                index,
                opacity,
                elapsed_secs: t - scene.start,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/select.rs"]
mod tests;
