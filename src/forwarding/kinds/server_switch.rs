//! Moves between servers of a proxy network.

use super::{MessageKindStrategy, simple_settings};
use crate::forwarding::domain::{
    ChannelConfig, ForwardPayload, KindSettings, MessageKind, Placeholders,
};

const DEFAULT_TEMPLATE: &str =
    "%player_display_name% switched from %from_server% to %to_server%";

/// Server switch forwarding.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerSwitchStrategy;

impl MessageKindStrategy for ServerSwitchStrategy {
    fn kind(&self) -> MessageKind {
        MessageKind::ServerSwitch
    }

    fn map_config(&self, config: &ChannelConfig, _payload: &ForwardPayload) -> KindSettings {
        simple_settings(&config.server_switch, DEFAULT_TEMPLATE)
    }

    fn set_placeholders(&self, payload: &ForwardPayload, placeholders: &mut Placeholders) {
        if let ForwardPayload::ServerSwitch { from, to } = payload {
            placeholders.insert("from_server", from.as_str());
            placeholders.insert("to_server", to.as_str());
        }
    }
}
