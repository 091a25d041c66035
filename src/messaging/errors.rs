//! # Messaging Error Types
//!
//! Structured error handling for the broker-facing side, using thiserror
//! instead of `Box<dyn Error>` patterns. Two failure classes exist here:
//! subscription registration against the broker (fatal to startup) and
//! payload decoding (the delivery is discarded and acknowledged).

use thiserror::Error;

/// Errors raised while registering subscriptions or decoding deliveries
#[derive(Error, Debug)]
pub enum MessagingError {
    #[error("Stream operation failed: {channel}: {operation}: {message}")]
    StreamOperation {
        channel: String,
        operation: String,
        message: String,
    },

    #[error("Message deserialization error: {message}")]
    MessageDeserialization { message: String },
}

impl MessagingError {
    /// Create a stream operation error
    pub fn stream_operation(
        channel: impl Into<String>,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::StreamOperation {
            channel: channel.into(),
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a message deserialization error
    pub fn message_deserialization(message: impl Into<String>) -> Self {
        Self::MessageDeserialization {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for MessagingError {
    fn from(err: serde_json::Error) -> Self {
        MessagingError::message_deserialization(err.to_string())
    }
}

/// Result type alias for messaging operations
pub type MessagingResult<T> = Result<T, MessagingError>;
