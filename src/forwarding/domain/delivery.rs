//! Per-channel delivery results and the cluster of successful deliveries.

use super::ReceivedMessage;
use crate::platform::{ChannelPermission, DestinationChannel};

/// What happened when delivering to one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The platform accepted the message.
    Delivered(ReceivedMessage),
    /// The bot lacks a permission the send requires.
    MissingPermission(ChannelPermission),
    /// The send failed; the error went to the error reporter.
    Failed(String),
}

/// Outcome of delivering one message to one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryResult {
    channel: DestinationChannel,
    outcome: DeliveryOutcome,
}

impl DeliveryResult {
    /// Creates a delivery result.
    #[must_use]
    pub const fn new(channel: DestinationChannel, outcome: DeliveryOutcome) -> Self {
        Self { channel, outcome }
    }

    /// Returns the target channel.
    #[must_use]
    pub const fn channel(&self) -> &DestinationChannel {
        &self.channel
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn outcome(&self) -> &DeliveryOutcome {
        &self.outcome
    }

    /// Returns the delivered message, if the send succeeded.
    #[must_use]
    pub const fn message(&self) -> Option<&ReceivedMessage> {
        match &self.outcome {
            DeliveryOutcome::Delivered(message) => Some(message),
            DeliveryOutcome::MissingPermission(_) | DeliveryOutcome::Failed(_) => None,
        }
    }

    /// Consumes the result, keeping only a delivered message.
    #[must_use]
    pub fn into_message(self) -> Option<ReceivedMessage> {
        match self.outcome {
            DeliveryOutcome::Delivered(message) => Some(message),
            DeliveryOutcome::MissingPermission(_) | DeliveryOutcome::Failed(_) => None,
        }
    }
}

/// Messages successfully delivered for one forward. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryCluster {
    messages: Vec<ReceivedMessage>,
}

impl DeliveryCluster {
    /// Collects the delivered messages, or `None` if nothing was delivered.
    #[must_use]
    pub fn from_results(results: impl IntoIterator<Item = DeliveryResult>) -> Option<Self> {
        let messages: Vec<_> = results
            .into_iter()
            .filter_map(DeliveryResult::into_message)
            .collect();
        if messages.is_empty() {
            None
        } else {
            Some(Self { messages })
        }
    }

    /// Returns the delivered messages.
    #[must_use]
    pub fn messages(&self) -> &[ReceivedMessage] {
        &self.messages
    }

    /// Returns the number of delivered messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns whether the cluster holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Merges another cluster into this one.
    pub fn extend(&mut self, other: Self) {
        self.messages.extend(other.messages);
    }

    /// Consumes the cluster into its messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<ReceivedMessage> {
        self.messages
    }
}
