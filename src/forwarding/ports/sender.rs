//! Messaging platform send port.

use crate::forwarding::domain::{OutgoingMessage, ReceivedMessage};
use crate::platform::DestinationChannel;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for message sends.
pub type SendResult<T> = Result<T, SendError>;

/// Posts messages into platform channels.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Sends `message` into `channel`, through a webhook when the channel's
    /// delivery mode asks for one.
    async fn send(
        &self,
        channel: &DestinationChannel,
        message: &OutgoingMessage,
    ) -> SendResult<ReceivedMessage>;
}

/// Errors returned by message senders.
#[derive(Debug, Clone, Error)]
pub enum SendError {
    /// The request did not reach the platform or got no answer.
    #[error("transport failure: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The platform refused the message.
    #[error("platform rejected the message: {0}")]
    Rejected(String),
}

impl SendError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
