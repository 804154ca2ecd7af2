use thiserror::Error;

/// Errors raised by the scoring engine
///
/// Only structurally invalid calls fail. Conditions like "no candidate
/// survived filtering" are returned as empty values instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl EngineError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
