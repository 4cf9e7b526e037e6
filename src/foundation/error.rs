/// Convenience result type used across storyreel.
pub type StoryreelResult<T> = Result<T, StoryreelError>;

/// Top-level error taxonomy used by definition-time APIs.
///
/// Per-frame sampling never fails; errors only surface while a storyboard, curve or transcript
/// is being defined or loaded.
#[derive(thiserror::Error, Debug)]
pub enum StoryreelError {
    /// Invalid user-provided timing or storyboard data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid animation definition (curve, spring, easing parameters).
    #[error("animation error: {0}")]
    Animation(String),

    /// A transcript line could not be parsed.
    #[error("parse error on line {line}: {msg}")]
    Parse {
        /// 1-based line number in the source text.
        line: usize,
        /// Human-readable reason.
        msg: String,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryreelError {
    /// Build a [`StoryreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoryreelError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`StoryreelError::Parse`] value.
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            msg: msg.into(),
        }
    }

    /// Build a [`StoryreelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
