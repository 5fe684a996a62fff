//! Player deaths.

use super::{MessageKindStrategy, simple_settings};
use crate::forwarding::domain::{
    ChannelConfig, ForwardPayload, KindSettings, MessageKind, Placeholders,
};

const DEFAULT_TEMPLATE: &str = "%message%";

/// Death forwarding.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeathStrategy;

impl MessageKindStrategy for DeathStrategy {
    fn kind(&self) -> MessageKind {
        MessageKind::Death
    }

    fn map_config(&self, config: &ChannelConfig, _payload: &ForwardPayload) -> KindSettings {
        simple_settings(&config.death, DEFAULT_TEMPLATE)
    }

    fn set_placeholders(&self, payload: &ForwardPayload, placeholders: &mut Placeholders) {
        if let ForwardPayload::Death { message } = payload {
            placeholders.insert("message", message.as_str());
        }
    }
}
