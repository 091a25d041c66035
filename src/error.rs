use thiserror::Error;

use crate::messaging::MessagingError;
use crate::processing::ProcessingError;

/// Crate-level error type for subsystem startup and consumption
#[derive(Debug, Error)]
pub enum StatusCoreError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("messaging error: {0}")]
    Messaging(#[from] MessagingError),

    #[error("status processing error: {0}")]
    Processing(#[from] ProcessingError),
}

pub type Result<T> = std::result::Result<T, StatusCoreError>;
