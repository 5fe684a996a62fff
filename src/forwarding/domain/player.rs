//! The player that triggered a forward.

use super::PlayerId;

/// Snapshot of a player as reported by the game platform adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    display_name: Option<String>,
    avatar_url: Option<String>,
    fake: bool,
}

impl Player {
    /// Creates a real player with only a username.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            display_name: None,
            avatar_url: None,
            fake: false,
        }
    }

    /// Sets the display name shown in game.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets the avatar URL used for webhook deliveries.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Marks the player as fake (an NPC or bot, not a connected human).
    #[must_use]
    pub const fn as_fake(mut self) -> Self {
        self.fake = true;
        self
    }

    /// Returns the player identifier.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display name, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Returns the avatar URL, if known.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Returns whether the player is fake.
    #[must_use]
    pub const fn is_fake(&self) -> bool {
        self.fake
    }
}
