//! # Workflow Status Model
//!
//! Pass-through representation of the orchestration engine's JSON status
//! report. This subsystem never interprets the report beyond handing it to
//! the execution handlers; the node phase that drives notification logic
//! comes back from the deploy handler, not from this structure.
//!
//! Unknown fields are ignored and every field defaults, so engine upgrades
//! that add report fields do not break decoding.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status report for one workflow run, as emitted by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkflowStatus {
    pub phase: Option<String>,
    pub message: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Per-node status keyed by node id.
    pub nodes: HashMap<String, NodeStatus>,
    /// Additional engine-specific fields carried through untouched.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Status of a single node within a workflow run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeStatus {
    pub id: String,
    pub name: String,
    pub display_name: Option<String>,
    pub phase: Option<String>,
    pub message: Option<String>,
    pub template_name: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}
