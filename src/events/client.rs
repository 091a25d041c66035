//! # Notification Client
//!
//! Dispatch seam for outbound notification events. Delivery is
//! best-effort: a dispatch failure is reported to the caller, which logs
//! it and moves on.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::events::event::NotificationEvent;

/// Errors surfaced by notification dispatch
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("notification encode failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("notifier request failed: {0}")]
    Transport(String),

    #[error("notifier rejected event with status {status}")]
    Rejected { status: u16 },
}

impl From<reqwest::Error> for DispatchError {
    fn from(err: reqwest::Error) -> Self {
        DispatchError::Transport(err.to_string())
    }
}

/// Transport-level notification delivery.
#[async_trait]
pub trait NotificationClient: Send + Sync {
    async fn write_event(&self, event: &NotificationEvent) -> Result<(), DispatchError>;
}

/// REST client for the notifier service.
#[derive(Debug, Clone)]
pub struct HttpNotificationClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpNotificationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    fn notify_url(&self) -> String {
        format!("{}/notify", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl NotificationClient for HttpNotificationClient {
    async fn write_event(&self, event: &NotificationEvent) -> Result<(), DispatchError> {
        debug!(
            correlation_id = %event.correlation_id,
            event_type = ?event.event_type,
            "dispatching notification event"
        );

        let response = self
            .http
            .post(self.notify_url())
            .json(event)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
