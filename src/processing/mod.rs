//! # Status Processing Module
//!
//! Per-message pipelines for the two status channels. The build path only
//! forwards state updates; the deploy path additionally resolves the run
//! record, classifies terminal outcomes, and conditionally dispatches a
//! notification event. The asymmetry is intentional.

pub mod build_status_processor;
pub mod deploy_status_processor;

use async_trait::async_trait;
use thiserror::Error;

use crate::events::DispatchError;
use crate::models::{LookupError, WorkflowStatus};

pub use build_status_processor::BuildStatusProcessor;
pub use deploy_status_processor::{classify_terminal, DeployOutcome, DeployStatusProcessor};

/// Error returned by an execution state handler
#[derive(Debug, Error)]
#[error("execution handler error: {message}")]
pub struct HandlerError {
    pub message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure of one per-message pipeline. Logged by the consume loop; the
/// delivery is acknowledged regardless, so none of these trigger redelivery.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("state update failed: {0}")]
    Handler(#[from] HandlerError),

    #[error("run record lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("notification dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Result of a deploy execution state update.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployStatusUpdate {
    /// Identifier of the deploy run the status applied to.
    pub run_id: i32,
    /// Status string recorded for the run.
    pub status: String,
}

/// State handler for build executions.
#[async_trait]
pub trait BuildExecutionHandler: Send + Sync {
    /// Apply a status report to the matching build execution; returns the
    /// updated execution's identifier.
    async fn update_workflow(&self, status: WorkflowStatus) -> Result<i32, HandlerError>;
}

/// State handler for deploy executions.
#[async_trait]
pub trait DeployExecutionHandler: Send + Sync {
    /// Apply a status report to the matching deploy run.
    async fn update_workflow(
        &self,
        status: WorkflowStatus,
    ) -> Result<DeployStatusUpdate, HandlerError>;
}
