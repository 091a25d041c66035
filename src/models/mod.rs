pub mod workflow_run;
pub mod workflow_status;

// Re-export core models for easy access
pub use workflow_run::{
    LookupError, PgRunRecordRepository, RunRecordRepository, WorkflowRunRecord, WorkflowType,
};
pub use workflow_status::{NodeStatus, WorkflowStatus};
