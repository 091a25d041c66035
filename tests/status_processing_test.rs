//! Processor pipeline tests driven through recording fakes for every
//! collaborator seam. These cover the notification decision table for the
//! deploy channel and the forward-only build channel.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use pipeline_status_core::events::{
    DispatchError, EventFactory, EventType, NotificationClient, NotificationEvent,
    PipelineCategory,
};
use pipeline_status_core::models::{
    LookupError, RunRecordRepository, WorkflowRunRecord, WorkflowStatus, WorkflowType,
};
use pipeline_status_core::processing::{
    BuildExecutionHandler, BuildStatusProcessor, DeployExecutionHandler, DeployOutcome,
    DeployStatusProcessor, DeployStatusUpdate, HandlerError, ProcessingError,
};

#[derive(Default)]
struct RecordingBuildHandler {
    calls: Mutex<Vec<WorkflowStatus>>,
    fail: bool,
}

#[async_trait]
impl BuildExecutionHandler for RecordingBuildHandler {
    async fn update_workflow(&self, status: WorkflowStatus) -> Result<i32, HandlerError> {
        self.calls.lock().unwrap().push(status);
        if self.fail {
            return Err(HandlerError::new("build execution not found"));
        }
        Ok(101)
    }
}

struct ScriptedDeployHandler {
    result: Result<DeployStatusUpdate, HandlerError>,
    calls: Mutex<u32>,
}

impl ScriptedDeployHandler {
    fn returning(run_id: i32, status: &str) -> Self {
        Self {
            result: Ok(DeployStatusUpdate {
                run_id,
                status: status.to_string(),
            }),
            calls: Mutex::new(0),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            result: Err(HandlerError::new(message)),
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl DeployExecutionHandler for ScriptedDeployHandler {
    async fn update_workflow(
        &self,
        _status: WorkflowStatus,
    ) -> Result<DeployStatusUpdate, HandlerError> {
        *self.calls.lock().unwrap() += 1;
        match &self.result {
            Ok(update) => Ok(update.clone()),
            Err(e) => Err(HandlerError::new(e.message.clone())),
        }
    }
}

#[derive(Default)]
struct InMemoryRunRecords {
    records: HashMap<i32, WorkflowRunRecord>,
    lookups: Mutex<Vec<i32>>,
}

impl InMemoryRunRecords {
    fn with(record: WorkflowRunRecord) -> Self {
        let mut records = HashMap::new();
        records.insert(record.id, record);
        Self {
            records,
            lookups: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RunRecordRepository for InMemoryRunRecords {
    async fn find_by_id(&self, run_id: i32) -> Result<WorkflowRunRecord, LookupError> {
        self.lookups.lock().unwrap().push(run_id);
        self.records
            .get(&run_id)
            .cloned()
            .ok_or(LookupError::NotFound { run_id })
    }
}

#[derive(Default)]
struct RecordingNotificationClient {
    events: Mutex<Vec<NotificationEvent>>,
    fail: bool,
}

#[async_trait]
impl NotificationClient for RecordingNotificationClient {
    async fn write_event(&self, event: &NotificationEvent) -> Result<(), DispatchError> {
        if self.fail {
            return Err(DispatchError::Transport("notifier unreachable".to_string()));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

fn run_record(run_id: i32, workflow_type: WorkflowType) -> WorkflowRunRecord {
    WorkflowRunRecord {
        id: run_id,
        name: format!("deploy-run-{run_id}"),
        workflow_type,
        status: "Succeeded".to_string(),
        pipeline_id: 7,
        app_id: 3,
        environment_id: 9,
        started_on: NaiveDateTime::default(),
    }
}

fn deploy_processor(
    handler: ScriptedDeployHandler,
    records: InMemoryRunRecords,
    notifications: Arc<RecordingNotificationClient>,
) -> DeployStatusProcessor {
    DeployStatusProcessor::new(
        Arc::new(handler),
        Arc::new(records),
        EventFactory::new(),
        notifications,
    )
}

#[tokio::test]
async fn build_handler_invoked_exactly_once_per_message() {
    let handler = Arc::new(RecordingBuildHandler::default());
    let processor = BuildStatusProcessor::new(handler.clone());

    let status = WorkflowStatus {
        phase: Some("Running".to_string()),
        ..Default::default()
    };
    processor.process(status.clone()).await.unwrap();

    let calls = handler.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], status);
}

#[tokio::test]
async fn build_handler_error_propagates_without_side_effects() {
    let handler = Arc::new(RecordingBuildHandler {
        fail: true,
        ..Default::default()
    });
    let processor = BuildStatusProcessor::new(handler.clone());

    let err = processor.process(WorkflowStatus::default()).await.unwrap_err();
    assert!(matches!(err, ProcessingError::Handler(_)));
    assert_eq!(handler.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn succeeded_pre_stage_dispatches_success_notification() {
    let notifications = Arc::new(RecordingNotificationClient::default());
    let processor = deploy_processor(
        ScriptedDeployHandler::returning(42, "Succeeded"),
        InMemoryRunRecords::with(run_record(42, WorkflowType::Pre)),
        notifications.clone(),
    );

    let outcome = processor.process(WorkflowStatus::default()).await.unwrap();
    assert_eq!(
        outcome,
        DeployOutcome::Notified {
            event_type: EventType::Success,
            stage: WorkflowType::Pre,
        }
    );

    let events = notifications.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.event_type, EventType::Success);
    assert_eq!(event.category, PipelineCategory::Deploy);
    assert_eq!(event.pipeline_id, Some(7));
    assert_eq!(event.app_id, 3);
    assert_eq!(event.env_id, Some(9));
    assert_eq!(event.run_id, Some(42));
    assert_eq!(event.stage, Some(WorkflowType::Pre));
}

#[tokio::test]
async fn failed_post_stage_dispatches_fail_notification() {
    let notifications = Arc::new(RecordingNotificationClient::default());
    let processor = deploy_processor(
        ScriptedDeployHandler::returning(42, "Failed"),
        InMemoryRunRecords::with(run_record(42, WorkflowType::Post)),
        notifications.clone(),
    );

    let outcome = processor.process(WorkflowStatus::default()).await.unwrap();
    assert_eq!(
        outcome,
        DeployOutcome::Notified {
            event_type: EventType::Fail,
            stage: WorkflowType::Post,
        }
    );
    assert_eq!(notifications.events.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn error_status_classifies_as_fail() {
    let notifications = Arc::new(RecordingNotificationClient::default());
    let processor = deploy_processor(
        ScriptedDeployHandler::returning(42, "Error"),
        InMemoryRunRecords::with(run_record(42, WorkflowType::Pre)),
        notifications.clone(),
    );

    let outcome = processor.process(WorkflowStatus::default()).await.unwrap();
    assert!(matches!(
        outcome,
        DeployOutcome::Notified {
            event_type: EventType::Fail,
            ..
        }
    ));
}

#[tokio::test]
async fn deploy_stage_terminal_outcome_is_never_notified() {
    for status in ["Succeeded", "Failed", "Error"] {
        let notifications = Arc::new(RecordingNotificationClient::default());
        let processor = deploy_processor(
            ScriptedDeployHandler::returning(42, status),
            InMemoryRunRecords::with(run_record(42, WorkflowType::Deploy)),
            notifications.clone(),
        );

        let outcome = processor.process(WorkflowStatus::default()).await.unwrap();
        assert_eq!(outcome, DeployOutcome::Suppressed);
        assert!(notifications.events.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn non_terminal_status_is_recorded_without_notification() {
    for workflow_type in [WorkflowType::Pre, WorkflowType::Post, WorkflowType::Deploy] {
        let notifications = Arc::new(RecordingNotificationClient::default());
        let processor = deploy_processor(
            ScriptedDeployHandler::returning(42, "Running"),
            InMemoryRunRecords::with(run_record(42, workflow_type)),
            notifications.clone(),
        );

        let outcome = processor.process(WorkflowStatus::default()).await.unwrap();
        assert_eq!(outcome, DeployOutcome::Recorded);
        assert!(notifications.events.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn missing_run_record_aborts_without_notification() {
    let notifications = Arc::new(RecordingNotificationClient::default());
    let processor = deploy_processor(
        ScriptedDeployHandler::returning(999, "Succeeded"),
        InMemoryRunRecords::default(),
        notifications.clone(),
    );

    let err = processor.process(WorkflowStatus::default()).await.unwrap_err();
    assert!(matches!(
        err,
        ProcessingError::Lookup(LookupError::NotFound { run_id: 999 })
    ));
    assert!(notifications.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn deploy_handler_error_aborts_before_lookup() {
    let notifications = Arc::new(RecordingNotificationClient::default());
    let records = InMemoryRunRecords::with(run_record(42, WorkflowType::Pre));
    let records = Arc::new(records);
    let processor = DeployStatusProcessor::new(
        Arc::new(ScriptedDeployHandler::failing("deploy run not tracked")),
        records.clone(),
        EventFactory::new(),
        notifications.clone(),
    );

    let err = processor.process(WorkflowStatus::default()).await.unwrap_err();
    assert!(matches!(err, ProcessingError::Handler(_)));
    assert!(records.lookups.lock().unwrap().is_empty());
    assert!(notifications.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn dispatch_failure_is_surfaced_but_state_update_stands() {
    let notifications = Arc::new(RecordingNotificationClient {
        fail: true,
        ..Default::default()
    });
    let handler = ScriptedDeployHandler::returning(42, "Succeeded");
    let processor = deploy_processor(
        handler,
        InMemoryRunRecords::with(run_record(42, WorkflowType::Post)),
        notifications.clone(),
    );

    let err = processor.process(WorkflowStatus::default()).await.unwrap_err();
    assert!(matches!(err, ProcessingError::Dispatch(_)));
    assert!(notifications.events.lock().unwrap().is_empty());
}
