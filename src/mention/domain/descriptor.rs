//! Cached mention metadata.

use crate::platform::{ChannelId, RoleId, UserId};
use std::fmt;

/// The kind of entity a mention targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MentionKind {
    /// A guild member.
    User,
    /// A guild role.
    Role,
    /// A guild channel.
    Channel,
}

impl MentionKind {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Role => "role",
            Self::Channel => "channel",
        }
    }
}

impl fmt::Display for MentionKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Metadata enabling literal-text-to-native-mention rewriting.
///
/// `search_text` is the literal form players type (`@Alice`, `#general`) and
/// `rendered_mention` is the platform markup that replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MentionDescriptor {
    kind: MentionKind,
    id: u64,
    search_text: String,
    rendered_mention: String,
    publicly_mentionable: bool,
}

impl MentionDescriptor {
    /// Describes a guild member by their effective display name.
    #[must_use]
    pub fn user(id: UserId, display_name: &str) -> Self {
        Self {
            kind: MentionKind::User,
            id: id.get(),
            search_text: format!("@{display_name}"),
            rendered_mention: format!("<@{id}>"),
            publicly_mentionable: true,
        }
    }

    /// Describes a guild role. `mentionable` mirrors the role's platform flag.
    #[must_use]
    pub fn role(id: RoleId, name: &str, mentionable: bool) -> Self {
        Self {
            kind: MentionKind::Role,
            id: id.get(),
            search_text: format!("@{name}"),
            rendered_mention: format!("<@&{id}>"),
            publicly_mentionable: mentionable,
        }
    }

    /// Describes a guild channel.
    #[must_use]
    pub fn channel(id: ChannelId, name: &str) -> Self {
        Self {
            kind: MentionKind::Channel,
            id: id.get(),
            search_text: format!("#{name}"),
            rendered_mention: format!("<#{id}>"),
            publicly_mentionable: true,
        }
    }

    /// Returns the mention kind.
    #[must_use]
    pub const fn kind(&self) -> MentionKind {
        self.kind
    }

    /// Returns the raw platform identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the literal text players type.
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Returns the native mention markup.
    #[must_use]
    pub fn rendered_mention(&self) -> &str {
        &self.rendered_mention
    }

    /// Returns whether anyone may mention the target (roles only differ).
    #[must_use]
    pub const fn is_publicly_mentionable(&self) -> bool {
        self.publicly_mentionable
    }
}
