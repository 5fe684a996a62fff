//! Player joins.

use super::MessageKindStrategy;
use crate::forwarding::domain::{
    ChannelConfig, ForwardPayload, KindSettings, MessageKind, MessageTemplate, Placeholders,
};
use crate::forwarding::services::DebouncePurpose;
use std::time::Duration;

const DEFAULT_TEMPLATE: &str = "%player_display_name% joined the server";

/// Join forwarding, optionally delayed so a quick leave hides both.
#[derive(Debug, Clone, Copy, Default)]
pub struct JoinStrategy;

impl MessageKindStrategy for JoinStrategy {
    fn kind(&self) -> MessageKind {
        MessageKind::Join
    }

    fn map_config(&self, config: &ChannelConfig, payload: &ForwardPayload) -> KindSettings {
        let settings = &config.join;
        let first_join = matches!(payload, ForwardPayload::Join { first_join: true, .. });
        let template = first_join
            .then(|| settings.first_join_template.clone())
            .flatten()
            .or_else(|| settings.template.clone())
            .unwrap_or_else(|| MessageTemplate::new(DEFAULT_TEMPLATE));
        KindSettings::new(settings.enabled, template)
            .with_delay(Duration::from_millis(settings.delay_ms))
            .with_forward_silent(settings.forward_silent)
    }

    fn set_placeholders(&self, payload: &ForwardPayload, placeholders: &mut Placeholders) {
        if let ForwardPayload::Join {
            message,
            first_join,
        } = payload
        {
            placeholders.insert("message", message.as_deref().unwrap_or_default());
            placeholders.insert("first_join", first_join.to_string());
        }
    }

    fn debounce_purpose(&self) -> Option<DebouncePurpose> {
        Some(DebouncePurpose::PendingJoin)
    }

    fn contradicts(&self) -> Option<DebouncePurpose> {
        Some(DebouncePurpose::RecentLeave)
    }
}
