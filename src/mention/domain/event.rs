//! Platform change notifications that keep the mention cache current.

use crate::platform::{ChannelId, GuildId, RoleId, UserId};

/// A change observed on the messaging platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MentionCacheEvent {
    /// A member joined or changed their effective name.
    MemberUpserted {
        /// Guild of the member.
        guild_id: GuildId,
        /// Member identifier.
        user_id: UserId,
        /// Effective display name.
        display_name: String,
    },
    /// A member left or was removed.
    MemberRemoved {
        /// Guild of the member.
        guild_id: GuildId,
        /// Member identifier.
        user_id: UserId,
    },
    /// A role was created, renamed, or had its mentionable flag changed.
    RoleUpserted {
        /// Guild of the role.
        guild_id: GuildId,
        /// Role identifier.
        role_id: RoleId,
        /// Role name.
        name: String,
        /// Platform mentionable flag.
        mentionable: bool,
    },
    /// A role was deleted.
    RoleRemoved {
        /// Guild of the role.
        guild_id: GuildId,
        /// Role identifier.
        role_id: RoleId,
    },
    /// A channel was created or renamed.
    ChannelUpserted {
        /// Guild of the channel.
        guild_id: GuildId,
        /// Channel identifier.
        channel_id: ChannelId,
        /// Channel name.
        name: String,
    },
    /// A channel was deleted.
    ChannelRemoved {
        /// Guild of the channel.
        guild_id: GuildId,
        /// Channel identifier.
        channel_id: ChannelId,
    },
    /// The bot left the guild; every cached mention for it is dropped.
    GuildRemoved {
        /// Guild identifier.
        guild_id: GuildId,
    },
}

impl MentionCacheEvent {
    /// Returns the guild the event concerns.
    #[must_use]
    pub const fn guild_id(&self) -> GuildId {
        match self {
            Self::MemberUpserted { guild_id, .. }
            | Self::MemberRemoved { guild_id, .. }
            | Self::RoleUpserted { guild_id, .. }
            | Self::RoleRemoved { guild_id, .. }
            | Self::ChannelUpserted { guild_id, .. }
            | Self::ChannelRemoved { guild_id, .. }
            | Self::GuildRemoved { guild_id } => *guild_id,
        }
    }
}
