//! # Notification Event Types
//!
//! Values carried to the notifier for terminal deploy-stage outcomes.
//! Events are transient: built, dispatched, and discarded within one
//! message delivery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::WorkflowType;

/// Terminal outcome classification of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Success,
    Fail,
}

/// Which pipeline class an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PipelineCategory {
    Build,
    Deploy,
}

/// Outbound notification event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub event_type: EventType,
    pub pipeline_id: Option<i32>,
    pub app_id: i32,
    pub env_id: Option<i32>,
    pub category: PipelineCategory,
    pub correlation_id: Uuid,
    pub event_time: DateTime<Utc>,
    /// Deploy run the event refers to; absent on base events.
    pub run_id: Option<i32>,
    /// Pre/Post stage tag; absent on base events.
    pub stage: Option<WorkflowType>,
    /// Run-record detail for notification templates.
    pub payload: Option<serde_json::Value>,
}
