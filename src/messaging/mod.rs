//! # Messaging Module
//!
//! Broker-facing side of status consumption: payload decoding and the two
//! durable queue-group subscriptions that feed the status processors.

pub mod codec;
pub mod errors;
pub mod subscriber;

pub use codec::decode;
pub use errors::{MessagingError, MessagingResult};
pub use subscriber::{
    StatusSubscriptionManager, SubscriptionHandles, SubscriptionSpec, BUILD_STATUS_SUBSCRIPTION,
    DEPLOY_STATUS_SUBSCRIPTION,
};
