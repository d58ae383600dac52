/// Convenience result type used across ledview.
pub type LedviewResult<T> = Result<T, LedviewError>;

/// Top-level error taxonomy used by the visualizer APIs.
#[derive(thiserror::Error, Debug)]
pub enum LedviewError {
    /// Invalid user-provided layout, color, or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while compositing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding captured frames into an animation.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LedviewError {
    /// Build a [`LedviewError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LedviewError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LedviewError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`LedviewError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
