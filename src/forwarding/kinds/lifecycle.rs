//! Server start and stop announcements.

use super::{MessageKindStrategy, simple_settings};
use crate::forwarding::domain::{
    ChannelConfig, ForwardPayload, KindSettings, MessageKind, Placeholders,
};

const START_TEMPLATE: &str = ":white_check_mark: **Server has started**";
const STOP_TEMPLATE: &str = ":octagonal_sign: **Server has stopped**";

/// Start or stop forwarding. Not tied to a player.
#[derive(Debug, Clone, Copy)]
pub struct LifecycleStrategy {
    kind: MessageKind,
}

impl LifecycleStrategy {
    /// Strategy for server start.
    #[must_use]
    pub const fn start() -> Self {
        Self {
            kind: MessageKind::Start,
        }
    }

    /// Strategy for server stop.
    #[must_use]
    pub const fn stop() -> Self {
        Self {
            kind: MessageKind::Stop,
        }
    }
}

impl MessageKindStrategy for LifecycleStrategy {
    fn kind(&self) -> MessageKind {
        self.kind
    }

    fn map_config(&self, config: &ChannelConfig, _payload: &ForwardPayload) -> KindSettings {
        if self.kind == MessageKind::Stop {
            simple_settings(&config.stop, STOP_TEMPLATE)
        } else {
            simple_settings(&config.start, START_TEMPLATE)
        }
    }

    fn set_placeholders(&self, _payload: &ForwardPayload, _placeholders: &mut Placeholders) {}

    fn player_driven(&self) -> bool {
        false
    }
}
