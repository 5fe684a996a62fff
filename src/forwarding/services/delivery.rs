//! Per-channel delivery with failure isolation.

use crate::forwarding::domain::{DeliveryOutcome, DeliveryResult, OutgoingMessage};
use crate::forwarding::ports::{ErrorReporter, MessageSender};
use crate::platform::DestinationChannel;
use futures::future::join_all;
use std::sync::Arc;

/// Sends one message into channels, turning every failure into a benign
/// [`DeliveryResult`].
#[derive(Clone)]
pub struct DeliveryExecutor {
    sender: Arc<dyn MessageSender>,
    reporter: Arc<dyn ErrorReporter>,
}

impl DeliveryExecutor {
    /// Creates an executor.
    #[must_use]
    pub fn new(sender: Arc<dyn MessageSender>, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self { sender, reporter }
    }

    /// Sends `message` into `channel`.
    ///
    /// A missing permission is logged naming the permission and the send is
    /// skipped. A failed send goes to the error reporter.
    pub async fn send(
        &self,
        channel: DestinationChannel,
        message: Arc<OutgoingMessage>,
    ) -> DeliveryResult {
        if let Some(permission) = channel.missing_permission() {
            tracing::error!(
                channel = %channel,
                guild_id = %channel.guild_id(),
                permission = %permission,
                "cannot deliver: bot lacks the {permission} permission in this channel"
            );
            return DeliveryResult::new(channel, DeliveryOutcome::MissingPermission(permission));
        }

        match self.sender.send(&channel, &message).await {
            Ok(received) => DeliveryResult::new(channel, DeliveryOutcome::Delivered(received)),
            Err(err) => {
                self.reporter
                    .report(&format!("failed to deliver message to {channel}"), &err);
                DeliveryResult::new(channel, DeliveryOutcome::Failed(err.to_string()))
            }
        }
    }

    /// Sends `message` into every channel concurrently.
    pub async fn send_all(
        &self,
        channels: Vec<DestinationChannel>,
        message: Arc<OutgoingMessage>,
    ) -> Vec<DeliveryResult> {
        join_all(
            channels
                .into_iter()
                .map(|channel| self.send(channel, Arc::clone(&message))),
        )
        .await
    }
}
