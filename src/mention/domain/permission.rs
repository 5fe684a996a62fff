//! Sender permissions and per-feature toggles that gate mentions.

use crate::platform::{RoleId, UserId};
use serde::Deserialize;
use std::fmt;

/// A sender permission consulted by the mention gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MentionPermission {
    /// Mention any user.
    AllUsers,
    /// Mention one specific user.
    User(UserId),
    /// Mention any role, mentionable or not.
    AllRoles,
    /// Mention roles whose platform mentionable flag is set.
    MentionableRoles,
    /// Mention one specific role.
    Role(RoleId),
    /// Use `@everyone` and `@here`.
    Everyone,
}

impl MentionPermission {
    /// Returns the permission node name as granted by server operators.
    #[must_use]
    pub fn node(&self) -> String {
        match self {
            Self::AllUsers => "mention.user.all".to_owned(),
            Self::User(id) => format!("mention.user.{id}"),
            Self::AllRoles => "mention.role.all".to_owned(),
            Self::MentionableRoles => "mention.role.mentionable".to_owned(),
            Self::Role(id) => format!("mention.role.{id}"),
            Self::Everyone => "mention.everyone".to_owned(),
        }
    }
}

impl fmt::Display for MentionPermission {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.node())
    }
}

/// Per-channel-config switches for each mention feature.
///
/// A disabled toggle denies the mention regardless of sender permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MentionToggles {
    /// Rewrite `@user` tokens.
    #[serde(default = "enabled")]
    pub users: bool,
    /// Rewrite `@role` tokens.
    #[serde(default = "enabled")]
    pub roles: bool,
    /// Rewrite `#channel` tokens.
    #[serde(default = "enabled")]
    pub channels: bool,
    /// Let `@everyone`/`@here` through for permitted senders.
    #[serde(default)]
    pub everyone: bool,
    /// Query the platform for `@user` tokens missing from the cache.
    #[serde(default)]
    pub uncached_users: bool,
}

const fn enabled() -> bool {
    true
}

impl Default for MentionToggles {
    fn default() -> Self {
        Self {
            users: true,
            roles: true,
            channels: true,
            everyone: false,
            uncached_users: false,
        }
    }
}
