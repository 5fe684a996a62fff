//! Player leaves.

use super::MessageKindStrategy;
use crate::forwarding::domain::{
    ChannelConfig, ForwardPayload, KindSettings, MessageKind, MessageTemplate, Placeholders,
};
use crate::forwarding::services::DebouncePurpose;
use std::time::Duration;

const DEFAULT_TEMPLATE: &str = "%player_display_name% left the server";

/// Leave forwarding. A leave cancels a pending join of the same player and
/// can itself be delayed so a quick rejoin hides both.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveStrategy;

impl MessageKindStrategy for LeaveStrategy {
    fn kind(&self) -> MessageKind {
        MessageKind::Leave
    }

    fn map_config(&self, config: &ChannelConfig, _payload: &ForwardPayload) -> KindSettings {
        let settings = &config.leave;
        let template = settings
            .template
            .clone()
            .unwrap_or_else(|| MessageTemplate::new(DEFAULT_TEMPLATE));
        KindSettings::new(settings.enabled, template)
            .with_delay(Duration::from_millis(settings.delay_ms))
            .with_forward_silent(settings.forward_silent)
    }

    fn set_placeholders(&self, payload: &ForwardPayload, placeholders: &mut Placeholders) {
        if let ForwardPayload::Leave { message } = payload {
            placeholders.insert("message", message.as_deref().unwrap_or_default());
        }
    }

    fn debounce_purpose(&self) -> Option<DebouncePurpose> {
        Some(DebouncePurpose::RecentLeave)
    }

    fn contradicts(&self) -> Option<DebouncePurpose> {
        Some(DebouncePurpose::PendingJoin)
    }
}
