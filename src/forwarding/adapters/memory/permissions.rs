//! In-memory sender permission grants.

use crate::forwarding::domain::{Player, PlayerId};
use crate::forwarding::ports::SenderPermissions;
use crate::mention::domain::MentionPermission;
use crate::platform::GuildId;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

/// Permission grants per player and guild.
#[derive(Debug, Clone, Default)]
pub struct InMemorySenderPermissions {
    grants: Arc<RwLock<HashMap<(PlayerId, GuildId), BTreeSet<MentionPermission>>>>,
}

impl InMemorySenderPermissions {
    /// Creates a store with no grants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `permission` to `player_id` in `guild_id`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when lock acquisition fails.
    pub fn grant(
        &self,
        player_id: PlayerId,
        guild_id: GuildId,
        permission: MentionPermission,
    ) -> std::io::Result<()> {
        let mut grants = self
            .grants
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        grants
            .entry((player_id, guild_id))
            .or_default()
            .insert(permission);
        Ok(())
    }
}

impl SenderPermissions for InMemorySenderPermissions {
    fn has_permission(
        &self,
        player: &Player,
        guild_id: GuildId,
        permission: &MentionPermission,
    ) -> bool {
        let Ok(grants) = self.grants.read() else {
            tracing::warn!("sender permission store is poisoned; denying");
            return false;
        };
        grants
            .get(&(player.id(), guild_id))
            .is_some_and(|granted| granted.contains(permission))
    }
}
