//! Chat lines.

use super::{MessageKindStrategy, simple_settings};
use crate::forwarding::domain::{
    ChannelConfig, ForwardPayload, KindSettings, MessageKind, Placeholders,
};

const DEFAULT_TEMPLATE: &str = "**%player_display_name%** » %message%";

/// Chat forwarding. Messages are built per guild so mentions follow each
/// guild's permissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatStrategy;

impl MessageKindStrategy for ChatStrategy {
    fn kind(&self) -> MessageKind {
        MessageKind::Chat
    }

    fn map_config(&self, config: &ChannelConfig, _payload: &ForwardPayload) -> KindSettings {
        simple_settings(&config.chat, DEFAULT_TEMPLATE)
    }

    fn set_placeholders(&self, payload: &ForwardPayload, placeholders: &mut Placeholders) {
        if let ForwardPayload::Chat { message } = payload {
            placeholders.insert("message", message.as_str());
        }
    }

    fn guild_scoped(&self) -> bool {
        true
    }

    fn mention_text<'a>(&self, payload: &'a ForwardPayload) -> Option<&'a str> {
        match payload {
            ForwardPayload::Chat { message } => Some(message),
            _ => None,
        }
    }
}
