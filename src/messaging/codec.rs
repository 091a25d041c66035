//! # Status Message Decoder
//!
//! Deserializes raw delivery payloads into [`WorkflowStatus`] values.
//! Pure and stateless; both subscription loops share it. A decode failure
//! means the payload is discarded by the caller, never redelivered.

use crate::messaging::errors::MessagingResult;
use crate::models::WorkflowStatus;

/// Decode one raw status payload.
pub fn decode(payload: &[u8]) -> MessagingResult<WorkflowStatus> {
    let status = serde_json::from_slice::<WorkflowStatus>(payload)?;
    Ok(status)
}
