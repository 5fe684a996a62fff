//! Notifications published on the forwarding event bus.

use super::{
    DeliveryCluster, ForwardPayload, ForwardRequest, GameChannelName, MessageKind,
    OutgoingMessage, Player,
};
use crate::platform::{DestinationChannel, GuildId};

/// Cancellable notification published just before delivery.
///
/// Subscribers may rewrite the message, drop destinations, or cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostProcessEvent {
    kind: MessageKind,
    payload: ForwardPayload,
    player: Option<Player>,
    game_channel: GameChannelName,
    guild_id: Option<GuildId>,
    destinations: Vec<DestinationChannel>,
    message: OutgoingMessage,
    cancelled: bool,
}

impl PostProcessEvent {
    /// Creates the notification for `request` in one game channel.
    #[must_use]
    pub fn new(
        request: &ForwardRequest,
        game_channel: GameChannelName,
        destinations: Vec<DestinationChannel>,
        message: OutgoingMessage,
    ) -> Self {
        Self {
            kind: request.kind(),
            payload: request.payload().clone(),
            player: request.player().cloned(),
            game_channel,
            guild_id: None,
            destinations,
            message,
            cancelled: false,
        }
    }

    /// Scopes the notification to one guild.
    #[must_use]
    pub const fn for_guild(mut self, guild_id: Option<GuildId>) -> Self {
        self.guild_id = guild_id;
        self
    }

    /// Returns the message kind.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns the request payload.
    #[must_use]
    pub const fn payload(&self) -> &ForwardPayload {
        &self.payload
    }

    /// Returns the triggering player.
    #[must_use]
    pub const fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Returns the game channel.
    #[must_use]
    pub const fn game_channel(&self) -> &GameChannelName {
        &self.game_channel
    }

    /// Returns the guild this message was built for, for guild-scoped kinds.
    #[must_use]
    pub const fn guild_id(&self) -> Option<GuildId> {
        self.guild_id
    }

    /// Returns the destinations about to receive the message.
    #[must_use]
    pub fn destinations(&self) -> &[DestinationChannel] {
        &self.destinations
    }

    /// Returns the destinations for modification.
    pub const fn destinations_mut(&mut self) -> &mut Vec<DestinationChannel> {
        &mut self.destinations
    }

    /// Returns the message about to be sent.
    #[must_use]
    pub const fn message(&self) -> &OutgoingMessage {
        &self.message
    }

    /// Returns the message for modification.
    pub const fn message_mut(&mut self) -> &mut OutgoingMessage {
        &mut self.message
    }

    /// Cancels delivery.
    pub const fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Returns whether a subscriber cancelled delivery.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Splits the notification into what should be delivered.
    #[must_use]
    pub fn into_delivery(self) -> (Vec<DestinationChannel>, OutgoingMessage) {
        (self.destinations, self.message)
    }
}

/// Notification published once a forward delivered at least one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredEvent {
    kind: MessageKind,
    payload: ForwardPayload,
    player: Option<Player>,
    game_channel: GameChannelName,
    guild_id: Option<GuildId>,
    cluster: DeliveryCluster,
}

impl DeliveredEvent {
    /// Creates the notification for `request` in one game channel.
    #[must_use]
    pub fn new(
        request: &ForwardRequest,
        game_channel: GameChannelName,
        cluster: DeliveryCluster,
    ) -> Self {
        Self {
            kind: request.kind(),
            payload: request.payload().clone(),
            player: request.player().cloned(),
            game_channel,
            guild_id: None,
            cluster,
        }
    }

    /// Scopes the notification to one guild.
    #[must_use]
    pub const fn for_guild(mut self, guild_id: Option<GuildId>) -> Self {
        self.guild_id = guild_id;
        self
    }

    /// Returns the message kind.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns the request payload.
    #[must_use]
    pub const fn payload(&self) -> &ForwardPayload {
        &self.payload
    }

    /// Returns the triggering player.
    #[must_use]
    pub const fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Returns the game channel.
    #[must_use]
    pub const fn game_channel(&self) -> &GameChannelName {
        &self.game_channel
    }

    /// Returns the guild, when every delivery landed in one guild.
    #[must_use]
    pub const fn guild_id(&self) -> Option<GuildId> {
        self.guild_id
    }

    /// Returns the delivered messages.
    #[must_use]
    pub const fn cluster(&self) -> &DeliveryCluster {
        &self.cluster
    }
}
