use std::ops::Range;

use crate::{
    foundation::error::{StoryreelError, StoryreelResult},
    transcript::model::Transcript,
};

/// Rules for grouping words into caption lines.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LineBreaking {
    /// Maximum units per line (`>= 1`).
    pub max_units: usize,
    /// A pause longer than this (seconds) starts a new line.
    pub max_gap_secs: f64,
}

impl Default for LineBreaking {
    fn default() -> Self {
        Self {
            max_units: 6,
            max_gap_secs: 0.6,
        }
    }
}

impl LineBreaking {
    /// Reject rules that would produce empty lines.
    pub fn validate(&self) -> StoryreelResult<()> {
        if self.max_units == 0 {
            return Err(StoryreelError::validation(
                "line breaking max_units must be >= 1",
            ));
        }
        if !(self.max_gap_secs.is_finite() && self.max_gap_secs >= 0.0) {
            return Err(StoryreelError::validation(
                "line breaking max_gap_secs must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// A run of consecutive transcript units shown together.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CaptionLine {
    /// Start of the first unit.
    pub start: f64,
    /// Latest end among the units.
    pub end: f64,
    /// Unit indices covered by the line.
    pub units: Range<usize>,
}

impl Transcript {
    /// Group units into caption lines.
    pub fn caption_lines(&self, rules: &LineBreaking) -> Vec<CaptionLine> {
        let max_units = rules.max_units.max(1);
        let mut lines: Vec<CaptionLine> = Vec::new();
        for (i, u) in self.units().iter().enumerate() {
            match lines.last_mut() {
                Some(line)
                    if line.units.len() < max_units && u.start - line.end <= rules.max_gap_secs =>
                {
                    line.units.end = i + 1;
                    line.end = line.end.max(u.end);
                }
                _ => lines.push(CaptionLine {
                    start: u.start,
                    end: u.end,
                    units: i..i + 1,
                }),
            }
        }
        lines
    }

    /// Joined text of a caption line.
    pub fn line_text(&self, line: &CaptionLine) -> String {
        self.units()
            .get(line.units.clone())
            .unwrap_or_default()
            .iter()
            .map(|u| u.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Index of the line on screen at `t`: the latest line with `start <= t`, as long as `t`
/// has not passed its end by more than `hold_secs`.
pub fn line_at(lines: &[CaptionLine], t: f64, hold_secs: f64) -> Option<usize> {
    let idx = lines.partition_point(|l| l.start <= t).checked_sub(1)?;
    let line = lines.get(idx)?;
    (t <= line.end + hold_secs.max(0.0)).then_some(idx)
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/lines.rs"]
mod tests;
