//! # Status Subscription Manager
//!
//! Registers the two durable queue-group subscriptions (build status,
//! deploy status) against the broker and runs one consume loop per
//! subscription.
//!
//! Delivery contract per subscription:
//! - explicit acknowledgment with a configurable ack-wait timeout
//! - at most one unacknowledged message in flight, which serializes the
//!   per-message pipeline and backpressures the broker
//! - a durable name so a restarted consumer resumes from its last
//!   acknowledged position
//! - a delivery group so horizontally scaled instances load-balance
//!
//! Every delivered message is acknowledged exactly once after the handler
//! returns, whether or not downstream processing succeeded. Failed updates
//! are therefore dropped, not redelivered; the ack-wait timeout only
//! matters when the process dies mid-handling.

use std::sync::Arc;
use std::time::Duration;

use async_nats::jetstream::{
    self,
    consumer::{push, AckPolicy, DeliverPolicy},
    stream::{Config as StreamConfig, StorageType},
};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::config::StatusCoreConfig;
use crate::constants::{build_channel, deploy_channel};
use crate::messaging::codec;
use crate::messaging::errors::{MessagingError, MessagingResult};
use crate::processing::{BuildStatusProcessor, DeployStatusProcessor};

/// Identity of one durable queue-group subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionSpec {
    pub channel: &'static str,
    pub queue_group: &'static str,
    pub durable_name: &'static str,
}

pub const BUILD_STATUS_SUBSCRIPTION: SubscriptionSpec = SubscriptionSpec {
    channel: build_channel::CHANNEL,
    queue_group: build_channel::QUEUE_GROUP,
    durable_name: build_channel::DURABLE_NAME,
};

pub const DEPLOY_STATUS_SUBSCRIPTION: SubscriptionSpec = SubscriptionSpec {
    channel: deploy_channel::CHANNEL,
    queue_group: deploy_channel::QUEUE_GROUP,
    durable_name: deploy_channel::DURABLE_NAME,
};

/// Join handles for the two running consume loops.
///
/// The loops run for the life of the process; the host decides whether to
/// await or abort them on shutdown.
pub struct SubscriptionHandles {
    pub build: JoinHandle<()>,
    pub deploy: JoinHandle<()>,
}

/// Owns subscription registration and the consume loops.
pub struct StatusSubscriptionManager {
    jetstream: jetstream::Context,
    ack_wait: Duration,
    stream_max_messages: i64,
    build_processor: Arc<BuildStatusProcessor>,
    deploy_processor: Arc<DeployStatusProcessor>,
}

impl StatusSubscriptionManager {
    pub fn new(
        client: async_nats::Client,
        config: &StatusCoreConfig,
        build_processor: Arc<BuildStatusProcessor>,
        deploy_processor: Arc<DeployStatusProcessor>,
    ) -> Self {
        Self {
            jetstream: jetstream::new(client),
            ack_wait: config.ack_wait(),
            stream_max_messages: config.stream_max_messages,
            build_processor,
            deploy_processor,
        }
    }

    /// Register both subscriptions, then spawn their consume loops.
    ///
    /// Registration failure on either channel is fatal: the error is
    /// propagated and no loop is spawned. A succeeding registration on one
    /// channel does not compensate for a failing registration on the other.
    pub async fn start(&self) -> MessagingResult<SubscriptionHandles> {
        let build_messages = self.register(&BUILD_STATUS_SUBSCRIPTION).await?;
        let deploy_messages = self.register(&DEPLOY_STATUS_SUBSCRIPTION).await?;

        let build_processor = Arc::clone(&self.build_processor);
        let build = tokio::spawn(async move {
            run_build_subscription(build_messages, build_processor).await;
        });

        let deploy_processor = Arc::clone(&self.deploy_processor);
        let deploy = tokio::spawn(async move {
            run_deploy_subscription(deploy_messages, deploy_processor).await;
        });

        Ok(SubscriptionHandles { build, deploy })
    }

    /// Ensure the channel's stream exists and create its durable consumer.
    async fn register(&self, spec: &SubscriptionSpec) -> MessagingResult<push::Messages> {
        self.jetstream
            .get_or_create_stream(stream_config(spec, self.stream_max_messages))
            .await
            .map_err(|e| {
                MessagingError::stream_operation(spec.channel, "get_or_create_stream", e.to_string())
            })?;

        let consumer = self
            .jetstream
            .create_consumer_on_stream(consumer_config(spec, self.ack_wait), spec.channel)
            .await
            .map_err(|e| {
                MessagingError::stream_operation(spec.channel, "create_consumer", e.to_string())
            })?;

        consumer.messages().await.map_err(|e| {
            MessagingError::stream_operation(spec.channel, "messages", e.to_string())
        })
    }
}

/// Stream configuration for one status channel.
fn stream_config(spec: &SubscriptionSpec, max_messages: i64) -> StreamConfig {
    StreamConfig {
        name: spec.channel.to_string(),
        subjects: vec![spec.channel.to_string()],
        max_messages,
        storage: StorageType::File,
        ..Default::default()
    }
}

/// Durable queue-group consumer configuration for one status channel.
fn consumer_config(spec: &SubscriptionSpec, ack_wait: Duration) -> push::Config {
    push::Config {
        durable_name: Some(spec.durable_name.to_string()),
        deliver_subject: format!("deliver.{}", spec.durable_name),
        deliver_group: Some(spec.queue_group.to_string()),
        filter_subject: spec.channel.to_string(),
        deliver_policy: DeliverPolicy::Last,
        ack_policy: AckPolicy::Explicit,
        ack_wait,
        max_ack_pending: 1,
        ..Default::default()
    }
}

async fn run_build_subscription(
    mut messages: push::Messages,
    processor: Arc<BuildStatusProcessor>,
) {
    let channel = BUILD_STATUS_SUBSCRIPTION.channel;
    while let Some(delivery) = messages.next().await {
        let message = match delivery {
            Ok(message) => message,
            Err(e) => {
                error!(channel, error = %e, "delivery stream error");
                continue;
            }
        };

        debug!(channel, "received build status update");
        match codec::decode(&message.payload) {
            Ok(status) => {
                if let Err(e) = processor.process(status).await {
                    error!(channel, error = %e, "build status update failed");
                }
            }
            Err(e) => error!(channel, error = %e, "discarding malformed status payload"),
        }

        acknowledge(&message, channel).await;
    }
    warn!(channel, "subscription delivery stream closed");
}

async fn run_deploy_subscription(
    mut messages: push::Messages,
    processor: Arc<DeployStatusProcessor>,
) {
    let channel = DEPLOY_STATUS_SUBSCRIPTION.channel;
    while let Some(delivery) = messages.next().await {
        let message = match delivery {
            Ok(message) => message,
            Err(e) => {
                error!(channel, error = %e, "delivery stream error");
                continue;
            }
        };

        debug!(channel, "received deploy status update");
        match codec::decode(&message.payload) {
            Ok(status) => match processor.process(status).await {
                Ok(outcome) => debug!(channel, ?outcome, "deploy status update handled"),
                Err(e) => error!(channel, error = %e, "deploy status update failed"),
            },
            Err(e) => error!(channel, error = %e, "discarding malformed status payload"),
        }

        acknowledge(&message, channel).await;
    }
    warn!(channel, "subscription delivery stream closed");
}

/// Acknowledge a delivery unconditionally. Ack failures are logged only;
/// the broker will redeliver after the ack-wait timeout.
async fn acknowledge(message: &jetstream::Message, channel: &'static str) {
    if let Err(e) = message.ack().await {
        warn!(channel, error = %e, "failed to acknowledge delivery");
    }
}
