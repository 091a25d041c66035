use crate::error::{Result, StatusCoreError};

/// Runtime configuration for the status consumption subsystem.
///
/// Connection details and the ack-wait duration are supplied by the
/// surrounding process, either directly or via `from_env`.
#[derive(Debug, Clone)]
pub struct StatusCoreConfig {
    pub broker_url: String,
    pub database_url: String,
    pub notifier_base_url: String,
    pub ack_wait_secs: u64,
    pub stream_max_messages: i64,
}

impl Default for StatusCoreConfig {
    fn default() -> Self {
        Self {
            broker_url: "nats://localhost:4222".to_string(),
            database_url: "postgresql://localhost/pipeline_development".to_string(),
            notifier_base_url: "http://localhost:3000".to_string(),
            ack_wait_secs: 30,
            stream_max_messages: 100_000,
        }
    }
}

impl StatusCoreConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(broker_url) = std::env::var("PIPELINE_BROKER_URL") {
            config.broker_url = broker_url;
        }

        if let Ok(db_url) = std::env::var("DATABASE_URL") {
            config.database_url = db_url;
        }

        if let Ok(notifier_url) = std::env::var("PIPELINE_NOTIFIER_URL") {
            config.notifier_base_url = notifier_url;
        }

        if let Ok(ack_wait) = std::env::var("PIPELINE_ACK_WAIT_SECS") {
            config.ack_wait_secs = ack_wait.parse().map_err(|e| {
                StatusCoreError::Configuration(format!("Invalid ack_wait_secs: {e}"))
            })?;
        }

        if let Ok(max_messages) = std::env::var("PIPELINE_STREAM_MAX_MESSAGES") {
            config.stream_max_messages = max_messages.parse().map_err(|e| {
                StatusCoreError::Configuration(format!("Invalid stream_max_messages: {e}"))
            })?;
        }

        Ok(config)
    }

    pub fn ack_wait(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.ack_wait_secs)
    }
}
