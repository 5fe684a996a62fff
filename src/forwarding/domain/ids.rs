//! Identifier and validated-name types for forwarding.

use super::ForwardingDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Name of the channel used when a game platform has no channel concept.
pub const DEFAULT_GAME_CHANNEL: &str = "global";

/// Stable identity of a player on the game server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Creates a new random player identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a player identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated logical game channel name (for example `global` or `staff`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameChannelName(String);

impl GameChannelName {
    /// Creates a validated game channel name.
    ///
    /// The input is trimmed. Names are case-sensitive and must not contain
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ForwardingDomainError`] when validation fails.
    pub fn new(value: impl Into<String>) -> Result<Self, ForwardingDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(ForwardingDomainError::EmptyGameChannelName);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ForwardingDomainError::InvalidGameChannelName(trimmed));
        }
        Ok(Self(trimmed))
    }

    /// Returns the channel name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GameChannelName {
    fn default() -> Self {
        Self(DEFAULT_GAME_CHANNEL.to_owned())
    }
}

impl TryFrom<String> for GameChannelName {
    type Error = ForwardingDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GameChannelName> for String {
    fn from(value: GameChannelName) -> Self {
        value.0
    }
}

impl AsRef<str> for GameChannelName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for GameChannelName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
