/// Convenience result alias used across the crate.
pub type AuditResult<T> = Result<T, AuditError>;

/// Top-level error type for geometry, rendering, capture and output.
#[derive(thiserror::Error, Debug)]
pub enum AuditError {
    /// Input or configuration rejected before any work was done.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization or compositing failed.
    #[error("render error: {0}")]
    Render(String),

    /// The external page capture did not produce a usable bitmap.
    #[error("capture error: {0}")]
    Capture(String),

    /// Style or config (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error (I/O, image codec, ...).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AuditError {
    /// Build [`AuditError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build [`AuditError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build [`AuditError::Capture`].
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build [`AuditError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
