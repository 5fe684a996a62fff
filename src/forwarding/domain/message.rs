//! Rendered, outgoing, and delivered messages.

use crate::mention::domain::{AllowedMentionSet, MentionError, neutralize_everyone};
use crate::platform::{ChannelId, GuildId, MessageId};
use chrono::{DateTime, Utc};

/// Output of the template formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    /// Message body.
    pub content: String,
    /// Webhook username, for webhook deliveries.
    pub webhook_username: Option<String>,
    /// Webhook avatar URL, for webhook deliveries.
    pub webhook_avatar_url: Option<String>,
}

impl RenderedMessage {
    /// Creates a rendered message with only a body.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            webhook_username: None,
            webhook_avatar_url: None,
        }
    }
}

/// A platform message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    content: String,
    webhook_username: Option<String>,
    webhook_avatar_url: Option<String>,
    allowed_mentions: AllowedMentionSet,
}

impl OutgoingMessage {
    /// Combines a rendered message with its allowed-mention declaration.
    #[must_use]
    pub fn new(rendered: RenderedMessage, allowed_mentions: AllowedMentionSet) -> Self {
        Self {
            content: rendered.content,
            webhook_username: rendered.webhook_username,
            webhook_avatar_url: rendered.webhook_avatar_url,
            allowed_mentions,
        }
    }

    /// Returns the body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replaces the body.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Returns the webhook username.
    #[must_use]
    pub fn webhook_username(&self) -> Option<&str> {
        self.webhook_username.as_deref()
    }

    /// Returns the webhook avatar URL.
    #[must_use]
    pub fn webhook_avatar_url(&self) -> Option<&str> {
        self.webhook_avatar_url.as_deref()
    }

    /// Returns which mentions may notify.
    #[must_use]
    pub const fn allowed_mentions(&self) -> &AllowedMentionSet {
        &self.allowed_mentions
    }

    /// Defuses `@everyone`/`@here` in every text field unless the
    /// declaration allows mass mentions.
    ///
    /// # Errors
    ///
    /// Returns [`MentionError::NeutralizationFailed`] if a trigger survives.
    pub fn neutralized(mut self) -> Result<Self, MentionError> {
        if self.allowed_mentions.everyone() {
            return Ok(self);
        }
        self.content = neutralize_everyone(&self.content)?;
        if let Some(username) = self.webhook_username.as_deref() {
            self.webhook_username = Some(neutralize_everyone(username)?);
        }
        Ok(self)
    }
}

/// A message the platform accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    id: MessageId,
    channel_id: ChannelId,
    guild_id: GuildId,
    content: String,
    sent_at: DateTime<Utc>,
}

impl ReceivedMessage {
    /// Creates a received message record.
    #[must_use]
    pub fn new(
        id: MessageId,
        channel_id: ChannelId,
        guild_id: GuildId,
        content: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            channel_id,
            guild_id,
            content: content.into(),
            sent_at,
        }
    }

    /// Returns the platform message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the channel the message landed in.
    #[must_use]
    pub const fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// Returns the guild the message landed in.
    #[must_use]
    pub const fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    /// Returns the delivered body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the platform accepted the message.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }
}
