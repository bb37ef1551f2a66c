use thiserror::Error;

/// Caller contract violations. State is left unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SousError {
    #[error("{0}")]
    InvalidInput(String),
}

impl SousError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("inference call failed: {0}")]
    Upstream(String),
    #[error("inference provider returned an empty response")]
    EmptyResponse,
    #[error("could not generate recipe after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<GenerationError>,
    },
}
