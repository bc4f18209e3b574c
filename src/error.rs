//! Error types for the timeline engine.

use crate::controller::TimelineState;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    /// No object in the collection carries temporal data.
    #[error("no temporal data: the dataset collection has no resolvable objects")]
    EmptyExtent,

    #[error("'{operation}' is not valid while the timeline is {state}")]
    InvalidState {
        operation: &'static str,
        state: TimelineState,
    },

    #[error("span width must be finite and greater than zero, got {0}ms")]
    InvalidSpanWidth(f64),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TimelineError {
    pub(crate) fn invalid_state(operation: &'static str, state: TimelineState) -> Self {
        TimelineError::InvalidState { operation, state }
    }
}
