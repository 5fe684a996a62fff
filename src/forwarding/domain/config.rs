//! Per-game-channel forwarding settings.

use super::{GameChannelName, Player, PlayerId};
use crate::mention::domain::MentionToggles;
use crate::platform::ChannelId;
use serde::Deserialize;
use std::time::Duration;

/// A message template plus optional webhook identity.
///
/// Deserializes from a plain string or from a table with `content`,
/// `webhook_username` and `webhook_avatar_url` keys.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "TemplateRepr")]
pub struct MessageTemplate {
    content: String,
    webhook_username: Option<String>,
    webhook_avatar_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TemplateRepr {
    Plain(String),
    Full {
        #[serde(default)]
        content: String,
        #[serde(default)]
        webhook_username: Option<String>,
        #[serde(default)]
        webhook_avatar_url: Option<String>,
    },
}

impl From<TemplateRepr> for MessageTemplate {
    fn from(repr: TemplateRepr) -> Self {
        match repr {
            TemplateRepr::Plain(content) => Self::new(content),
            TemplateRepr::Full {
                content,
                webhook_username,
                webhook_avatar_url,
            } => Self {
                content,
                webhook_username,
                webhook_avatar_url,
            },
        }
    }
}

impl MessageTemplate {
    /// Creates a template without webhook identity.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            webhook_username: None,
            webhook_avatar_url: None,
        }
    }

    /// Sets the webhook username template.
    #[must_use]
    pub fn with_webhook_username(mut self, username: impl Into<String>) -> Self {
        self.webhook_username = Some(username.into());
        self
    }

    /// Sets the webhook avatar URL template.
    #[must_use]
    pub fn with_webhook_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.webhook_avatar_url = Some(avatar_url.into());
        self
    }

    /// Returns the content template.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the webhook username template.
    #[must_use]
    pub fn webhook_username(&self) -> Option<&str> {
        self.webhook_username.as_deref()
    }

    /// Returns the webhook avatar URL template.
    #[must_use]
    pub fn webhook_avatar_url(&self) -> Option<&str> {
        self.webhook_avatar_url.as_deref()
    }

    /// Returns whether the content template is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Players whose events are not forwarded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IgnoreRules {
    /// Skip NPCs and other fake players.
    #[serde(default = "enabled")]
    pub fake_players: bool,
    /// Usernames to skip, matched case-insensitively.
    #[serde(default)]
    pub player_names: Vec<String>,
    /// Player identities to skip.
    #[serde(default)]
    pub player_ids: Vec<PlayerId>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            fake_players: true,
            player_names: Vec::new(),
            player_ids: Vec::new(),
        }
    }
}

impl IgnoreRules {
    /// Returns whether events from `player` are skipped.
    #[must_use]
    pub fn ignores(&self, player: &Player) -> bool {
        (self.fake_players && player.is_fake())
            || self.player_ids.contains(&player.id())
            || self
                .player_names
                .iter()
                .any(|name| name.eq_ignore_ascii_case(player.name()))
    }
}

/// Settings shared by kinds without extra knobs.
///
/// A missing `template` falls back to the kind's built-in default; an
/// explicitly empty one disables the message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageSettings {
    /// Whether the kind is forwarded at all.
    #[serde(default = "enabled")]
    pub enabled: bool,
    /// Message template.
    #[serde(default)]
    pub template: Option<MessageTemplate>,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            template: None,
        }
    }
}

/// Join message settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JoinSettings {
    /// Whether joins are forwarded.
    #[serde(default = "enabled")]
    pub enabled: bool,
    /// Message template.
    #[serde(default)]
    pub template: Option<MessageTemplate>,
    /// Template used for a player's first join.
    #[serde(default)]
    pub first_join_template: Option<MessageTemplate>,
    /// Debounce window in milliseconds; a leave inside it suppresses both.
    #[serde(default)]
    pub delay_ms: u64,
    /// Forward joins of silent (vanished) players.
    #[serde(default)]
    pub forward_silent: bool,
}

impl Default for JoinSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            template: None,
            first_join_template: None,
            delay_ms: 0,
            forward_silent: false,
        }
    }
}

/// Leave message settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaveSettings {
    /// Whether leaves are forwarded.
    #[serde(default = "enabled")]
    pub enabled: bool,
    /// Message template.
    #[serde(default)]
    pub template: Option<MessageTemplate>,
    /// Debounce window in milliseconds; a rejoin inside it suppresses both.
    #[serde(default)]
    pub delay_ms: u64,
    /// Forward leaves of silent (vanished) players.
    #[serde(default)]
    pub forward_silent: bool,
}

impl Default for LeaveSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            template: None,
            delay_ms: 0,
            forward_silent: false,
        }
    }
}

/// Configuration of one logical game channel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ChannelConfig {
    #[serde(skip)]
    name: GameChannelName,
    /// Platform channels the game channel is mirrored into.
    #[serde(default)]
    pub destinations: Vec<ChannelId>,
    /// Players whose events are skipped.
    #[serde(default)]
    pub ignores: IgnoreRules,
    /// Mention feature switches.
    #[serde(default)]
    pub mentions: MentionToggles,
    /// Chat settings.
    #[serde(default)]
    pub chat: MessageSettings,
    /// Join settings.
    #[serde(default)]
    pub join: JoinSettings,
    /// Leave settings.
    #[serde(default)]
    pub leave: LeaveSettings,
    /// Death settings.
    #[serde(default)]
    pub death: MessageSettings,
    /// Advancement settings.
    #[serde(default)]
    pub award: MessageSettings,
    /// Server switch settings.
    #[serde(default)]
    pub server_switch: MessageSettings,
    /// Server start settings.
    #[serde(default)]
    pub start: MessageSettings,
    /// Server stop settings.
    #[serde(default)]
    pub stop: MessageSettings,
}

impl ChannelConfig {
    /// Creates a configuration with default settings for every kind.
    #[must_use]
    pub fn new(name: GameChannelName) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Replaces the game channel name.
    #[must_use]
    pub fn named(mut self, name: GameChannelName) -> Self {
        self.name = name;
        self
    }

    /// Sets the destination channels.
    #[must_use]
    pub fn with_destinations(mut self, destinations: impl IntoIterator<Item = ChannelId>) -> Self {
        self.destinations = destinations.into_iter().collect();
        self
    }

    /// Returns the game channel name.
    #[must_use]
    pub const fn name(&self) -> &GameChannelName {
        &self.name
    }
}

/// Settings of one kind after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindSettings {
    /// Whether the kind is forwarded.
    pub enabled: bool,
    /// Template to render.
    pub template: MessageTemplate,
    /// Debounce window; zero forwards immediately.
    pub delay: Duration,
    /// Whether silent requests are forwarded.
    pub forward_silent: bool,
}

impl KindSettings {
    /// Creates settings with no debounce that skip silent requests.
    #[must_use]
    pub const fn new(enabled: bool, template: MessageTemplate) -> Self {
        Self {
            enabled,
            template,
            delay: Duration::ZERO,
            forward_silent: false,
        }
    }

    /// Sets the debounce window.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets whether silent requests are forwarded.
    #[must_use]
    pub const fn with_forward_silent(mut self, forward_silent: bool) -> Self {
        self.forward_silent = forward_silent;
        self
    }
}

const fn enabled() -> bool {
    true
}
