//! Sender permission lookups.

use crate::forwarding::domain::Player;
use crate::mention::domain::MentionPermission;
use crate::platform::GuildId;

/// Answers whether a player holds a mention permission in a guild.
#[cfg_attr(test, mockall::automock)]
pub trait SenderPermissions: Send + Sync {
    /// Returns whether `player` holds `permission` when posting into
    /// `guild_id`.
    fn has_permission(
        &self,
        player: &Player,
        guild_id: GuildId,
        permission: &MentionPermission,
    ) -> bool;
}
