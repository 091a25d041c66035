#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Pipeline Status Core
//!
//! Consumes asynchronous status notifications from an external
//! workflow-orchestration engine and translates them into persisted state
//! updates for build and deploy pipeline executions, plus conditional
//! outbound notification events for terminal deploy-stage outcomes.
//!
//! ## Architecture
//!
//! Two durable queue-group subscriptions are registered against the
//! broker, one per status channel. Each subscription admits at most one
//! in-flight message, so per-channel processing is fully serialized and
//! slow downstream calls backpressure the broker naturally. Every
//! delivery is acknowledged exactly once after handling, regardless of
//! outcome; failed updates are logged and dropped, never redelivered.
//!
//! The build path forwards state updates only. The deploy path also
//! resolves the run record, classifies terminal outcomes, and dispatches
//! a notification event for Pre/Post stage runs. The asymmetry mirrors
//! the product behavior and is intentional.
//!
//! ## Module Organization
//!
//! - [`models`] - Status reports and deploy run records
//! - [`messaging`] - Payload decoding and subscription lifecycle
//! - [`processing`] - Per-message pipelines for both channels
//! - [`events`] - Notification event construction and dispatch
//! - [`config`] - Runtime configuration
//! - [`error`] - Crate-level error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pipeline_status_core::config::StatusCoreConfig;
//! use pipeline_status_core::events::EventFactory;
//! use pipeline_status_core::messaging::StatusSubscriptionManager;
//! use pipeline_status_core::processing::{BuildStatusProcessor, DeployStatusProcessor};
//!
//! # async fn example(
//! #     build_handler: Arc<dyn pipeline_status_core::processing::BuildExecutionHandler>,
//! #     deploy_handler: Arc<dyn pipeline_status_core::processing::DeployExecutionHandler>,
//! #     run_records: Arc<dyn pipeline_status_core::models::RunRecordRepository>,
//! #     notifications: Arc<dyn pipeline_status_core::events::NotificationClient>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let config = StatusCoreConfig::from_env()?;
//! let client = async_nats::connect(&config.broker_url).await?;
//!
//! let build = Arc::new(BuildStatusProcessor::new(build_handler));
//! let deploy = Arc::new(DeployStatusProcessor::new(
//!     deploy_handler,
//!     run_records,
//!     EventFactory::new(),
//!     notifications,
//! ));
//!
//! let manager = StatusSubscriptionManager::new(client, &config, build, deploy);
//! let handles = manager.start().await?;
//! handles.build.await?;
//! handles.deploy.await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod logging;
pub mod messaging;
pub mod models;
pub mod processing;

pub use config::StatusCoreConfig;
pub use error::{Result, StatusCoreError};
pub use events::{
    DispatchError, EventFactory, EventType, NotificationClient, NotificationEvent,
    PipelineCategory,
};
pub use messaging::{MessagingError, StatusSubscriptionManager, SubscriptionHandles};
pub use models::{LookupError, RunRecordRepository, WorkflowRunRecord, WorkflowStatus, WorkflowType};
pub use processing::{
    BuildExecutionHandler, BuildStatusProcessor, DeployExecutionHandler, DeployOutcome,
    DeployStatusProcessor, DeployStatusUpdate, HandlerError, ProcessingError,
};
