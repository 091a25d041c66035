//! # Build Status Processor
//!
//! Forwards decoded build status updates to the build execution handler.
//! This path never emits notifications.

use std::sync::Arc;

use tracing::debug;

use crate::models::WorkflowStatus;
use crate::processing::{BuildExecutionHandler, ProcessingError};

pub struct BuildStatusProcessor {
    build_handler: Arc<dyn BuildExecutionHandler>,
}

impl BuildStatusProcessor {
    pub fn new(build_handler: Arc<dyn BuildExecutionHandler>) -> Self {
        Self { build_handler }
    }

    /// Apply one decoded status report to the build execution state.
    pub async fn process(&self, status: WorkflowStatus) -> Result<(), ProcessingError> {
        let execution_id = self.build_handler.update_workflow(status).await?;
        debug!(execution_id, "build execution state updated");
        Ok(())
    }
}
