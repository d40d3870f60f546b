/// Convenience result type used across the crate.
pub type PumpkinResult<T> = Result<T, PumpkinError>;

/// Top-level error taxonomy.
///
/// Missing assets and zero-length script entries are not errors: they degrade to fallbacks and
/// empty frame ranges. What remains here is invalid configuration, encoder/process failures and
/// wrapped IO.
#[derive(thiserror::Error, Debug)]
pub enum PumpkinError {
    /// Invalid user-provided configuration or script data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rendering, encoding or synthesizing output.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing configuration and scripts.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PumpkinError {
    /// Build a [`PumpkinError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PumpkinError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`PumpkinError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
