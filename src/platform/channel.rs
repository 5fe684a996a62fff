//! Resolved destination channel handles and their permission state.

use super::{ChannelId, GuildId};
use std::collections::BTreeSet;
use std::fmt;

/// Platform permission relevant to delivering a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelPermission {
    /// See the channel at all.
    ViewChannel,
    /// Post messages in a top-level channel.
    SendMessages,
    /// Post messages inside a thread.
    SendMessagesInThreads,
    /// Create and execute webhooks.
    ManageWebhooks,
}

impl ChannelPermission {
    /// Returns the platform's canonical permission name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewChannel => "VIEW_CHANNEL",
            Self::SendMessages => "SEND_MESSAGES",
            Self::SendMessagesInThreads => "SEND_MESSAGES_IN_THREADS",
            Self::ManageWebhooks => "MANAGE_WEBHOOKS",
        }
    }
}

impl fmt::Display for ChannelPermission {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Shape of a destination channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// A top-level text channel.
    Text,
    /// A thread nested under a parent text channel.
    Thread {
        /// Parent channel of the thread.
        parent: ChannelId,
    },
}

/// How messages are posted into a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeliveryMode {
    /// Posted as the bot user.
    #[default]
    Regular,
    /// Posted through a webhook, allowing a per-message username and avatar.
    Webhook,
}

/// A concrete channel a forward can be delivered to.
///
/// Handles are produced by the destination resolver and carry the bot's
/// known permission state for the channel at resolution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationChannel {
    id: ChannelId,
    guild_id: GuildId,
    name: String,
    kind: ChannelKind,
    mode: DeliveryMode,
    permissions: BTreeSet<ChannelPermission>,
}

impl DestinationChannel {
    /// Creates a top-level text channel handle with regular delivery and no
    /// known permissions.
    #[must_use]
    pub fn new(id: ChannelId, guild_id: GuildId, name: impl Into<String>) -> Self {
        Self {
            id,
            guild_id,
            name: name.into(),
            kind: ChannelKind::Text,
            mode: DeliveryMode::Regular,
            permissions: BTreeSet::new(),
        }
    }

    /// Marks the channel as a thread under `parent`.
    #[must_use]
    pub const fn in_thread(mut self, parent: ChannelId) -> Self {
        self.kind = ChannelKind::Thread { parent };
        self
    }

    /// Sets the delivery mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: DeliveryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replaces the known permission state.
    #[must_use]
    pub fn with_permissions(
        mut self,
        permissions: impl IntoIterator<Item = ChannelPermission>,
    ) -> Self {
        self.permissions = permissions.into_iter().collect();
        self
    }

    /// Returns the channel identifier.
    #[must_use]
    pub const fn id(&self) -> ChannelId {
        self.id
    }

    /// Returns the owning guild.
    #[must_use]
    pub const fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    /// Returns the channel display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the channel shape.
    #[must_use]
    pub const fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// Returns the delivery mode.
    #[must_use]
    pub const fn mode(&self) -> DeliveryMode {
        self.mode
    }

    /// Returns whether the bot is known to hold `permission` here.
    #[must_use]
    pub fn has_permission(&self, permission: ChannelPermission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Returns the permissions a send into this channel requires.
    ///
    /// Webhook sends need webhook management regardless of channel shape;
    /// regular sends need the thread-specific permission inside threads.
    #[must_use]
    pub const fn required_permissions(&self) -> [ChannelPermission; 2] {
        let send = match (self.mode, self.kind) {
            (DeliveryMode::Webhook, _) => ChannelPermission::ManageWebhooks,
            (DeliveryMode::Regular, ChannelKind::Thread { .. }) => {
                ChannelPermission::SendMessagesInThreads
            }
            (DeliveryMode::Regular, ChannelKind::Text) => ChannelPermission::SendMessages,
        };
        [ChannelPermission::ViewChannel, send]
    }

    /// Returns the first required permission the bot lacks, if any.
    #[must_use]
    pub fn missing_permission(&self) -> Option<ChannelPermission> {
        self.required_permissions()
            .into_iter()
            .find(|permission| !self.has_permission(*permission))
    }
}

impl fmt::Display for DestinationChannel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{} ({})", self.name, self.id)
    }
}
