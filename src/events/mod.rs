//! # Notification Events Module
//!
//! Outbound notification event construction and dispatch for terminal
//! deploy-stage outcomes.

pub mod client;
pub mod event;
pub mod factory;

// Re-export key types for convenience
pub use client::{DispatchError, HttpNotificationClient, NotificationClient};
pub use event::{EventType, NotificationEvent, PipelineCategory};
pub use factory::EventFactory;
