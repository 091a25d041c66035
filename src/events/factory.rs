//! # Event Factory
//!
//! Builds base notification events and enriches them with deploy run
//! detail. Construction only; dispatch lives in [`crate::events::client`].

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::events::event::{EventType, NotificationEvent, PipelineCategory};
use crate::models::{WorkflowRunRecord, WorkflowType};

/// Stateless builder for notification events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventFactory;

impl EventFactory {
    pub fn new() -> Self {
        Self
    }

    /// Build a base event from the pipeline identity of an outcome.
    pub fn build(
        &self,
        event_type: EventType,
        pipeline_id: Option<i32>,
        app_id: i32,
        env_id: Option<i32>,
        category: PipelineCategory,
    ) -> NotificationEvent {
        NotificationEvent {
            event_type,
            pipeline_id,
            app_id,
            env_id,
            category,
            correlation_id: Uuid::new_v4(),
            event_time: Utc::now(),
            run_id: None,
            stage: None,
            payload: None,
        }
    }

    /// Enrich a base event with deploy run detail and its stage tag.
    pub fn enrich_deploy_stage(
        &self,
        mut event: NotificationEvent,
        record: &WorkflowRunRecord,
        stage: WorkflowType,
    ) -> NotificationEvent {
        event.run_id = Some(record.id);
        event.stage = Some(stage);
        event.payload = Some(json!({
            "runName": record.name,
            "runStatus": record.status,
            "startedOn": record.started_on,
        }));
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn sample_record() -> WorkflowRunRecord {
        WorkflowRunRecord {
            id: 42,
            name: "pre-deploy-42".to_string(),
            workflow_type: WorkflowType::Pre,
            status: "Succeeded".to_string(),
            pipeline_id: 7,
            app_id: 3,
            environment_id: 9,
            started_on: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_build_base_event() {
        let factory = EventFactory::new();
        let event = factory.build(
            EventType::Success,
            Some(7),
            3,
            Some(9),
            PipelineCategory::Deploy,
        );

        assert_eq!(event.event_type, EventType::Success);
        assert_eq!(event.pipeline_id, Some(7));
        assert_eq!(event.app_id, 3);
        assert_eq!(event.env_id, Some(9));
        assert_eq!(event.category, PipelineCategory::Deploy);
        assert_eq!(event.run_id, None);
        assert_eq!(event.stage, None);
    }

    #[test]
    fn test_enrich_attaches_run_detail_and_stage() {
        let factory = EventFactory::new();
        let record = sample_record();
        let base = factory.build(
            EventType::Fail,
            Some(record.pipeline_id),
            record.app_id,
            Some(record.environment_id),
            PipelineCategory::Deploy,
        );

        let event = factory.enrich_deploy_stage(base, &record, WorkflowType::Post);

        assert_eq!(event.run_id, Some(42));
        assert_eq!(event.stage, Some(WorkflowType::Post));
        let payload = event.payload.expect("enriched event carries payload");
        assert_eq!(payload["runName"], "pre-deploy-42");
        assert_eq!(payload["runStatus"], "Succeeded");
    }

    #[test]
    fn test_events_get_distinct_correlation_ids() {
        let factory = EventFactory::new();
        let first = factory.build(EventType::Success, None, 1, None, PipelineCategory::Deploy);
        let second = factory.build(EventType::Success, None, 1, None, PipelineCategory::Deploy);
        assert_ne!(first.correlation_id, second.correlation_id);
    }
}
