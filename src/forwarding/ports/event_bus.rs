//! Event bus port for forwarding notifications.

use crate::forwarding::domain::{DeliveredEvent, PostProcessEvent};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event bus operations.
pub type EventBusResult<T> = Result<T, EventBusError>;

/// Publishes forwarding notifications to the rest of the application.
#[async_trait]
pub trait ForwardEventBus: Send + Sync {
    /// Publishes the cancellable pre-delivery notification and returns it
    /// as left by subscribers.
    async fn publish_post_process(
        &self,
        event: PostProcessEvent,
    ) -> EventBusResult<PostProcessEvent>;

    /// Publishes the post-delivery notification.
    async fn publish_delivered(&self, event: DeliveredEvent) -> EventBusResult<()>;
}

/// Errors returned by event bus adapters.
#[derive(Debug, Clone, Error)]
pub enum EventBusError {
    /// The bus no longer accepts events.
    #[error("event bus is closed")]
    Closed,

    /// A subscriber or the bus itself failed.
    #[error("event bus failure: {0}")]
    Listener(Arc<dyn std::error::Error + Send + Sync>),
}

impl EventBusError {
    /// Wraps a listener error.
    pub fn listener(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Listener(Arc::new(err))
    }
}
