/// Convenience result type used across scrollseq.
pub type ScrollSeqResult<T> = Result<T, ScrollSeqError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScrollSeqError {
    /// The source identifier has no digit run to derive a frame sequence from.
    #[error("pattern error: {0}")]
    Pattern(String),

    /// A single frame could not be acquired or decoded.
    ///
    /// The frame loader recovers from this locally; it never aborts a player.
    #[error("frame load error: {0}")]
    FrameLoad(String),

    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A player operation was invoked in a state that does not accept it.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollSeqError {
    /// Build a [`ScrollSeqError::Pattern`] value.
    pub fn pattern(msg: impl Into<String>) -> Self {
        Self::Pattern(msg.into())
    }

    /// Build a [`ScrollSeqError::FrameLoad`] value.
    pub fn frame_load(msg: impl Into<String>) -> Self {
        Self::FrameLoad(msg.into())
    }

    /// Build a [`ScrollSeqError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollSeqError::Lifecycle`] value.
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    /// Build a [`ScrollSeqError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for errors that end a player's setup.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::FrameLoad(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
