//! # Deploy Run Record Model
//!
//! Persisted record of one deploy-execution run, owned by the persistence
//! layer. This subsystem only reads records, keyed by the run id returned
//! from the deploy execution handler; the record supplies the pipeline,
//! application, and environment identity for outbound notifications plus
//! the stage tag that gates them.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use thiserror::Error;

/// Stage tag of a deploy-execution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkflowType {
    Pre,
    Post,
    Deploy,
}

impl WorkflowType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowType::Pre => "PRE",
            WorkflowType::Post => "POST",
            WorkflowType::Deploy => "DEPLOY",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PRE" => Some(WorkflowType::Pre),
            "POST" => Some(WorkflowType::Post),
            "DEPLOY" => Some(WorkflowType::Deploy),
            _ => None,
        }
    }
}

impl std::fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One deploy-execution run with its pipeline identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRunRecord {
    pub id: i32,
    pub name: String,
    pub workflow_type: WorkflowType,
    pub status: String,
    pub pipeline_id: i32,
    pub app_id: i32,
    pub environment_id: i32,
    pub started_on: NaiveDateTime,
}

/// Errors surfaced by run record lookups
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("workflow run {run_id} not found")]
    NotFound { run_id: i32 },

    #[error("workflow run {run_id} carries unknown workflow type '{value}'")]
    UnknownWorkflowType { run_id: i32, value: String },

    #[error("run record query failed: {0}")]
    Database(String),
}

impl From<sqlx::Error> for LookupError {
    fn from(err: sqlx::Error) -> Self {
        LookupError::Database(err.to_string())
    }
}

/// Read-only access to deploy run records.
#[async_trait]
pub trait RunRecordRepository: Send + Sync {
    async fn find_by_id(&self, run_id: i32) -> Result<WorkflowRunRecord, LookupError>;
}

/// Database row shape; the stage tag is stored as text and converted at
/// this edge.
#[derive(Debug, FromRow)]
struct WorkflowRunRow {
    id: i32,
    name: String,
    workflow_type: String,
    status: String,
    pipeline_id: i32,
    app_id: i32,
    environment_id: i32,
    started_on: NaiveDateTime,
}

impl WorkflowRunRow {
    fn into_record(self) -> Result<WorkflowRunRecord, LookupError> {
        let workflow_type = WorkflowType::parse(&self.workflow_type).ok_or_else(|| {
            LookupError::UnknownWorkflowType {
                run_id: self.id,
                value: self.workflow_type.clone(),
            }
        })?;

        Ok(WorkflowRunRecord {
            id: self.id,
            name: self.name,
            workflow_type,
            status: self.status,
            pipeline_id: self.pipeline_id,
            app_id: self.app_id,
            environment_id: self.environment_id,
            started_on: self.started_on,
        })
    }
}

/// PostgreSQL-backed run record repository.
#[derive(Debug, Clone)]
pub struct PgRunRecordRepository {
    pool: PgPool,
}

impl PgRunRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RunRecordRepository for PgRunRecordRepository {
    async fn find_by_id(&self, run_id: i32) -> Result<WorkflowRunRecord, LookupError> {
        let row = sqlx::query_as::<_, WorkflowRunRow>(
            r#"
            SELECT r.id,
                   r.name,
                   r.workflow_type,
                   r.status,
                   w.pipeline_id,
                   p.app_id,
                   p.environment_id,
                   r.started_on
            FROM deploy_stage_runs r
            JOIN deploy_workflows w ON w.id = r.deploy_workflow_id
            JOIN pipelines p ON p.id = w.pipeline_id
            WHERE r.id = $1
            "#,
        )
        .bind(run_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(LookupError::NotFound { run_id })?;

        row.into_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_type_parse_round_trip() {
        for wf_type in [WorkflowType::Pre, WorkflowType::Post, WorkflowType::Deploy] {
            assert_eq!(WorkflowType::parse(wf_type.as_str()), Some(wf_type));
        }
        assert_eq!(WorkflowType::parse("CI"), None);
    }

    #[test]
    fn test_row_conversion_rejects_unknown_stage_tag() {
        let row = WorkflowRunRow {
            id: 12,
            name: "deploy-12".to_string(),
            workflow_type: "ROLLBACK".to_string(),
            status: "Succeeded".to_string(),
            pipeline_id: 7,
            app_id: 3,
            environment_id: 9,
            started_on: chrono::NaiveDateTime::default(),
        };

        let err = row.into_record().unwrap_err();
        assert!(matches!(err, LookupError::UnknownWorkflowType { run_id: 12, .. }));
    }

    #[test]
    fn test_row_conversion_preserves_pipeline_identity() {
        let row = WorkflowRunRow {
            id: 42,
            name: "pre-deploy-42".to_string(),
            workflow_type: "PRE".to_string(),
            status: "Succeeded".to_string(),
            pipeline_id: 7,
            app_id: 3,
            environment_id: 9,
            started_on: chrono::NaiveDateTime::default(),
        };

        let record = row.into_record().unwrap();
        assert_eq!(record.workflow_type, WorkflowType::Pre);
        assert_eq!(
            (record.pipeline_id, record.app_id, record.environment_id),
            (7, 3, 9)
        );
    }
}
