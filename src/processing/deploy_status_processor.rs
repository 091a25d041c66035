//! # Deploy Status Processor
//!
//! Per-message pipeline for the deploy status channel:
//!
//! 1. forward the status report to the deploy execution handler
//! 2. resolve the run record by the returned run id
//! 3. classify the recorded status; non-terminal ends processing
//! 4. gate on the stage tag; Deploy-stage outcomes are never notified here
//! 5. build, enrich, and dispatch the notification event
//!
//! The first failing step aborts the pipeline. No step is retried.

use std::sync::Arc;

use tracing::debug;

use crate::constants::node_phase;
use crate::events::{EventFactory, EventType, NotificationClient, PipelineCategory};
use crate::models::{RunRecordRepository, WorkflowStatus, WorkflowType};
use crate::processing::{DeployExecutionHandler, ProcessingError};

/// Terminal fate of one deploy status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    /// State updated; the run has not reached a terminal status yet.
    Recorded,
    /// Terminal outcome on the primary deploy stage; intentionally not
    /// notified by this component.
    Suppressed,
    /// Terminal Pre/Post outcome, notification dispatched.
    Notified {
        event_type: EventType,
        stage: WorkflowType,
    },
}

pub struct DeployStatusProcessor {
    deploy_handler: Arc<dyn DeployExecutionHandler>,
    run_records: Arc<dyn RunRecordRepository>,
    event_factory: EventFactory,
    notifications: Arc<dyn NotificationClient>,
}

impl DeployStatusProcessor {
    pub fn new(
        deploy_handler: Arc<dyn DeployExecutionHandler>,
        run_records: Arc<dyn RunRecordRepository>,
        event_factory: EventFactory,
        notifications: Arc<dyn NotificationClient>,
    ) -> Self {
        Self {
            deploy_handler,
            run_records,
            event_factory,
            notifications,
        }
    }

    /// Apply one decoded status report to the deploy execution state and
    /// dispatch a notification for terminal Pre/Post outcomes.
    pub async fn process(&self, status: WorkflowStatus) -> Result<DeployOutcome, ProcessingError> {
        let update = self.deploy_handler.update_workflow(status).await?;
        debug!(run_id = update.run_id, status = %update.status, "deploy execution state updated");

        let record = self.run_records.find_by_id(update.run_id).await?;

        let Some(event_type) = classify_terminal(&update.status) else {
            return Ok(DeployOutcome::Recorded);
        };

        let stage = match record.workflow_type {
            WorkflowType::Pre | WorkflowType::Post => record.workflow_type,
            WorkflowType::Deploy => {
                debug!(run_id = record.id, "terminal deploy-stage outcome, not notified");
                return Ok(DeployOutcome::Suppressed);
            }
        };

        let event = self.event_factory.build(
            event_type,
            Some(record.pipeline_id),
            record.app_id,
            Some(record.environment_id),
            PipelineCategory::Deploy,
        );
        let event = self.event_factory.enrich_deploy_stage(event, &record, stage);

        self.notifications.write_event(&event).await?;
        debug!(
            run_id = record.id,
            stage = %stage,
            event_type = ?event_type,
            "deploy stage notification dispatched"
        );

        Ok(DeployOutcome::Notified { event_type, stage })
    }
}

/// Classify a recorded run status. Terminal statuses map to an event type;
/// anything else means the run is still in flight.
pub fn classify_terminal(status: &str) -> Option<EventType> {
    match status {
        node_phase::SUCCEEDED => Some(EventType::Success),
        node_phase::FAILED | node_phase::ERROR => Some(EventType::Fail),
        _ => None,
    }
}
