use std::path::Path;

use crate::foundation::error::{StoryreelError, StoryreelResult};

/// One timed word or phrase of narration. Times are in seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimedText {
    /// Start of the spoken window.
    pub start: f64,
    /// End of the spoken window (`>= start`).
    pub end: f64,
    /// Display text.
    pub text: String,
    /// Rendered with the emphasis style.
    #[serde(default)]
    pub emphasis: bool,
}

impl TimedText {
    /// Build a non-emphasized unit.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            emphasis: false,
        }
    }

    /// Mark the unit as emphasized.
    pub fn emphasized(mut self) -> Self {
        self.emphasis = true;
        self
    }

    /// Spoken duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Center of the spoken window.
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.start + self.end)
    }
}

/// Ordered sequence of timed text units.
///
/// Invariants (checked on construction and deserialization): every time is finite,
/// `start <= end`, and units are sorted by `start`. Display windows may overlap.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<TimedText>", into = "Vec<TimedText>")]
pub struct Transcript {
    units: Vec<TimedText>,
}

impl TryFrom<Vec<TimedText>> for Transcript {
    type Error = StoryreelError;

    fn try_from(units: Vec<TimedText>) -> StoryreelResult<Self> {
        Self::new(units)
    }
}

impl From<Transcript> for Vec<TimedText> {
    fn from(t: Transcript) -> Self {
        t.units
    }
}

impl Transcript {
    /// Validate and wrap `units`.
    pub fn new(units: Vec<TimedText>) -> StoryreelResult<Self> {
        for (i, u) in units.iter().enumerate() {
            if !(u.start.is_finite() && u.end.is_finite()) {
                return Err(StoryreelError::validation(format!(
                    "transcript unit {i} ('{}') has non-finite times",
                    u.text
                )));
            }
            if u.start > u.end {
                return Err(StoryreelError::validation(format!(
                    "transcript unit {i} ('{}') ends before it starts ({} > {})",
                    u.text, u.start, u.end
                )));
            }
        }
        if let Some(i) = units.windows(2).position(|w| w[0].start > w[1].start) {
            return Err(StoryreelError::validation(format!(
                "transcript units must be ordered by start (unit {} starts at {}, before {})",
                i + 1,
                units[i + 1].start,
                units[i].start
            )));
        }
        Ok(Self { units })
    }

    /// Parse timestamp-range-prefixed lines. See [`crate::parse_transcript`].
    pub fn parse(src: &str) -> StoryreelResult<Self> {
        crate::transcript::parse::parse_transcript(src)
    }

    /// Read and parse a transcript text file.
    pub fn from_path(path: impl AsRef<Path>) -> StoryreelResult<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|e| {
            StoryreelError::validation(format!("read transcript '{}': {e}", path.display()))
        })?;
        Self::parse(&src)
    }

    /// Units in start order.
    pub fn units(&self) -> &[TimedText] {
        &self.units
    }

    /// Unit at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&TimedText> {
        self.units.get(index)
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// `true` when there are no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Latest end time across all units, or 0 for an empty transcript.
    pub fn end_secs(&self) -> f64 {
        self.units.iter().map(|u| u.end).fold(0.0, f64::max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/model.rs"]
mod tests;
