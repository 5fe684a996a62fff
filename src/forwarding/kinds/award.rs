//! Advancements and achievements.

use super::{MessageKindStrategy, simple_settings};
use crate::forwarding::domain::{
    ChannelConfig, ForwardPayload, KindSettings, MessageKind, Placeholders,
};

const DEFAULT_TEMPLATE: &str = "%player_display_name% made the advancement **%award_title%**";

/// Advancement forwarding.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwardStrategy;

impl MessageKindStrategy for AwardStrategy {
    fn kind(&self) -> MessageKind {
        MessageKind::Award
    }

    fn map_config(&self, config: &ChannelConfig, _payload: &ForwardPayload) -> KindSettings {
        simple_settings(&config.award, DEFAULT_TEMPLATE)
    }

    fn set_placeholders(&self, payload: &ForwardPayload, placeholders: &mut Placeholders) {
        if let ForwardPayload::Award { title, message } = payload {
            placeholders.insert("award_title", title.as_str());
            placeholders.insert("message", message.as_deref().unwrap_or(title));
        }
    }
}
