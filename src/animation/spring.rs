use crate::{
    animation::curve::Lerp,
    foundation::core::Fps,
    foundation::error::{StoryreelError, StoryreelResult},
};

/// Deviation from the target below which a spring counts as settled.
pub const DEFAULT_SETTLE_THRESHOLD: f64 = 0.005;

/// Upper bound on the settle scan. Undamped springs report this duration.
const MAX_SETTLE_SECS: f64 = 60.0;

/// Damping ratios this close to 1 use the critically damped response.
const CRITICAL_EPS: f64 = 1e-6;

/// Physical parameters of a damped spring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Spring constant (`> 0`).
    pub stiffness: f64,
    /// Damping coefficient (`>= 0`).
    pub damping: f64,
    /// Mass (`> 0`).
    pub mass: f64,
    /// Never pass the target value.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Reject non-physical parameters.
    pub fn validate(&self) -> StoryreelResult<()> {
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(StoryreelError::animation("spring stiffness must be > 0"));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(StoryreelError::animation("spring damping must be >= 0"));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(StoryreelError::animation("spring mass must be > 0"));
        }
        Ok(())
    }

    /// Damping ratio: `< 1` oscillates, `1` is critical, `> 1` is overdamped.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness.max(0.0) * self.mass).sqrt()).max(1e-9)
    }

    /// Normalized step response (0 at rest, 1 at target) after `secs` seconds.
    pub fn progress_at_secs(&self, secs: f64) -> f64 {
        if secs.is_nan() || secs <= 0.0 {
            return 0.0;
        }
        let x = step_response(secs, self.stiffness, self.damping, self.mass);
        if self.overshoot_clamping {
            x.min(1.0)
        } else {
            x
        }
    }

    /// Number of frames after which the response stays within `threshold` of the target.
    ///
    /// The scan stops once the response can no longer leave the band: immediately for
    /// non-oscillating springs, and once the decay envelope drops under `threshold` otherwise.
    pub fn settle_frames(&self, fps: Fps, threshold: f64) -> u64 {
        let max_frames = (MAX_SETTLE_SECS * fps.as_f64()).ceil() as u64;
        let zeta = self.damping_ratio();
        let monotone = zeta > 1.0 - CRITICAL_EPS;
        let w0 = (self.stiffness.max(0.0) / self.mass.max(1e-9)).sqrt();
        let amplitude = if monotone {
            0.0
        } else {
            1.0 / (1.0 - zeta * zeta).sqrt()
        };

        let mut last_outside = None;
        for f in 0..=max_frames {
            let secs = fps.frames_to_secs(f);
            if (1.0 - self.progress_at_secs(secs)).abs() > threshold {
                last_outside = Some(f);
                continue;
            }
            if monotone || amplitude * (-zeta * w0 * secs).exp() <= threshold {
                break;
            }
        }
        match last_outside {
            None => 0,
            Some(f) => f.saturating_add(1).min(max_frames),
        }
    }
}

/// A spring animation between two values, activated at a given local frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Spring<T> {
    /// Rest value, held before activation.
    pub from: T,
    /// Target value.
    pub to: T,
    /// Local frame at which the spring is released.
    #[serde(default)]
    pub delay_frames: f64,
    /// Time-stretch the response so it settles after exactly this many frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_frames: Option<f64>,
    /// Physical parameters.
    #[serde(default)]
    pub config: SpringConfig,
}

impl<T> Spring<T> {
    /// Spring from `from` to `to` with default physics, released at frame 0.
    pub fn new(from: T, to: T) -> Self {
        Self {
            from,
            to,
            delay_frames: 0.0,
            duration_frames: None,
            config: SpringConfig::default(),
        }
    }

    /// Release the spring at `frames`.
    pub fn delayed(mut self, frames: f64) -> Self {
        self.delay_frames = frames;
        self
    }

    /// Stretch the response to settle after `frames`.
    pub fn settling_in(mut self, frames: f64) -> Self {
        self.duration_frames = Some(frames);
        self
    }

    /// Replace the physical parameters.
    pub fn with_config(mut self, config: SpringConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate physics and timing parameters.
    pub fn validate(&self) -> StoryreelResult<()> {
        self.config.validate()?;
        if !self.delay_frames.is_finite() {
            return Err(StoryreelError::animation("spring delay must be finite"));
        }
        if let Some(d) = self.duration_frames
            && !(d.is_finite() && d >= 0.0)
        {
            return Err(StoryreelError::animation(
                "spring duration_frames must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Normalized progress at `local_frame`; 0 before activation.
    pub fn progress(&self, local_frame: f64, fps: Fps) -> f64 {
        spring_progress(
            local_frame - self.delay_frames,
            fps,
            &self.config,
            self.duration_frames,
        )
    }
}

impl<T> Spring<T>
where
    T: Lerp + Clone,
{
    /// Value at `local_frame`.
    pub fn sample(&self, local_frame: f64, fps: Fps) -> T {
        let elapsed = local_frame - self.delay_frames;
        if elapsed.is_nan() || elapsed < 0.0 {
            return self.from.clone();
        }
        T::lerp(&self.from, &self.to, self.progress(local_frame, fps))
    }
}

/// Normalized spring progress `elapsed_frames` after activation.
///
/// With `duration_frames`, time is scaled so the natural settle duration maps onto it.
pub fn spring_progress(
    elapsed_frames: f64,
    fps: Fps,
    config: &SpringConfig,
    duration_frames: Option<f64>,
) -> f64 {
    if elapsed_frames.is_nan() || elapsed_frames <= 0.0 {
        return 0.0;
    }
    match duration_frames {
        None => config.progress_at_secs(elapsed_frames / fps.as_f64()),
        Some(d) if d <= 0.0 => 1.0,
        Some(d) => stretched_progress(
            elapsed_frames,
            fps,
            config,
            d,
            config.settle_frames(fps, DEFAULT_SETTLE_THRESHOLD),
        ),
    }
}

/// [`spring_progress`] with a duration, given the spring's natural settle frames up front.
///
/// Callers sampling the same spring many times compute `natural_settle_frames` once.
pub(crate) fn stretched_progress(
    elapsed_frames: f64,
    fps: Fps,
    config: &SpringConfig,
    duration_frames: f64,
    natural_settle_frames: u64,
) -> f64 {
    if elapsed_frames.is_nan() || elapsed_frames <= 0.0 {
        return 0.0;
    }
    if duration_frames <= 0.0 || natural_settle_frames == 0 {
        return 1.0;
    }
    let effective_frames = elapsed_frames * (natural_settle_frames as f64) / duration_frames;
    config.progress_at_secs(effective_frames / fps.as_f64())
}

fn step_response(t: f64, stiffness: f64, damping: f64, mass: f64) -> f64 {
    // Step response from 0 to 1 with x(0)=0, v(0)=0.
    let k = stiffness.max(0.0);
    let c = damping.max(0.0);
    let m = mass.max(1e-9);

    let w0 = (k / m).sqrt();
    if w0 == 0.0 {
        return t.min(1.0);
    }
    let zeta = c / (2.0 * (k * m).sqrt()).max(1e-9);

    if (zeta - 1.0).abs() < CRITICAL_EPS {
        // Critically damped.
        let e = (-w0 * t).exp();
        1.0 - e * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        // Underdamped.
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let e = (-zeta * w0 * t).exp();
        let k = zeta / (1.0 - zeta * zeta).sqrt();
        1.0 - e * ((wd * t).cos() + k * (wd * t).sin())
    } else {
        // Overdamped.
        let z2 = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - z2);
        let r2 = -w0 * (zeta + z2);
        let c2 = (zeta + z2) / (2.0 * z2);
        let c1 = (zeta - z2) / (2.0 * z2);
        1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
