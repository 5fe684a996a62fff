//! Terminal outcomes of forwards.

use super::ForwardError;
use crate::forwarding::domain::{DeliveryCluster, GameChannelName, MessageKind};
use std::fmt;

/// Why a forward did nothing. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoOpReason {
    /// A listener cancelled the request before the pipeline saw it.
    Cancelled,
    /// Another pipeline or listener already handled the request.
    AlreadyProcessed,
    /// The requested game channel has no configuration.
    ChannelNotConfigured,
    /// No game channel is configured at all.
    NoChannelsConfigured,
    /// The message kind is disabled for the channel.
    Disabled,
    /// The configured template is blank.
    EmptyTemplate,
    /// The template rendered to nothing.
    EmptyMessage,
    /// The player is ignored by the channel.
    Ignored,
    /// The request is silent and the channel does not forward silent events.
    Silent,
    /// No destination resolved.
    NoDestinations,
}

impl NoOpReason {
    /// Returns a short description for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cancelled => "request cancelled",
            Self::AlreadyProcessed => "request already processed",
            Self::ChannelNotConfigured => "game channel not configured",
            Self::NoChannelsConfigured => "no game channels configured",
            Self::Disabled => "message kind disabled",
            Self::EmptyTemplate => "template is empty",
            Self::EmptyMessage => "message rendered empty",
            Self::Ignored => "player ignored",
            Self::Silent => "silent request",
            Self::NoDestinations => "no destinations resolved",
        }
    }
}

impl fmt::Display for NoOpReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Outcome of forwarding into one game channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// Nothing was sent, by configuration.
    Skipped(NoOpReason),
    /// A contradicting event cancelled the forward inside its debounce
    /// window, or this event contradicted a pending one.
    Suppressed,
    /// A post-process subscriber cancelled delivery.
    CancelledByListener,
    /// At least one message was delivered.
    Delivered(DeliveryCluster),
    /// Every send failed or was skipped for missing permissions.
    Undelivered,
}

/// Result of one game channel within a forward.
#[derive(Debug, Clone)]
pub struct ChannelForward {
    /// Game channel the result belongs to.
    pub game_channel: GameChannelName,
    /// Outcome, or the error already logged for it.
    pub result: Result<ForwardOutcome, ForwardError>,
}

/// Everything one call to the pipeline did.
#[derive(Debug, Clone)]
pub struct ForwardReport {
    kind: MessageKind,
    skipped: Option<NoOpReason>,
    channels: Vec<ChannelForward>,
}

impl ForwardReport {
    /// A report for a request that never reached any channel.
    #[must_use]
    pub const fn skipped(kind: MessageKind, reason: NoOpReason) -> Self {
        Self {
            kind,
            skipped: Some(reason),
            channels: Vec::new(),
        }
    }

    /// A report with one entry per game channel.
    #[must_use]
    pub const fn for_channels(kind: MessageKind, channels: Vec<ChannelForward>) -> Self {
        Self {
            kind,
            skipped: None,
            channels,
        }
    }

    /// Returns the message kind.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns why the whole request was skipped, if it was.
    #[must_use]
    pub const fn skip_reason(&self) -> Option<NoOpReason> {
        self.skipped
    }

    /// Returns the per-channel results.
    #[must_use]
    pub fn channels(&self) -> &[ChannelForward] {
        &self.channels
    }

    /// Returns the result for one game channel.
    #[must_use]
    pub fn outcome_for(
        &self,
        game_channel: &GameChannelName,
    ) -> Option<&Result<ForwardOutcome, ForwardError>> {
        self.channels
            .iter()
            .find(|entry| &entry.game_channel == game_channel)
            .map(|entry| &entry.result)
    }

    /// Returns the total number of delivered messages.
    #[must_use]
    pub fn delivered_count(&self) -> usize {
        self.channels
            .iter()
            .filter_map(|entry| match &entry.result {
                Ok(ForwardOutcome::Delivered(cluster)) => Some(cluster.len()),
                _ => None,
            })
            .sum()
    }

    /// Returns the failed game channels with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&GameChannelName, &ForwardError)> {
        self.channels.iter().filter_map(|entry| match &entry.result {
            Err(err) => Some((&entry.game_channel, err)),
            Ok(_) => None,
        })
    }
}
