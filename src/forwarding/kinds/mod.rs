//! Per-message-kind specializations of the forwarding pipeline.
//!
//! Every kind implements [`MessageKindStrategy`]; the pipeline runs one
//! generic flow and asks the strategy for the steps that differ.

mod award;
mod chat;
mod death;
mod join;
mod leave;
mod lifecycle;
mod server_switch;

pub use award::AwardStrategy;
pub use chat::ChatStrategy;
pub use death::DeathStrategy;
pub use join::JoinStrategy;
pub use leave::LeaveStrategy;
pub use lifecycle::LifecycleStrategy;
pub use server_switch::ServerSwitchStrategy;

use crate::forwarding::domain::{
    ChannelConfig, DeliveredEvent, DeliveryCluster, ForwardPayload, ForwardRequest,
    KindSettings, MessageKind, MessageSettings, MessageTemplate, OutgoingMessage, Placeholders,
    PostProcessEvent,
};
use crate::forwarding::services::DebouncePurpose;
use crate::platform::{DestinationChannel, GuildId};

/// The steps of a forward that vary by message kind.
pub trait MessageKindStrategy: Send + Sync {
    /// Returns the kind handled.
    fn kind(&self) -> MessageKind;

    /// Extracts this kind's settings from a channel configuration, applying
    /// kind defaults.
    fn map_config(&self, config: &ChannelConfig, payload: &ForwardPayload) -> KindSettings;

    /// Adds kind-specific placeholder values.
    fn set_placeholders(&self, payload: &ForwardPayload, placeholders: &mut Placeholders);

    /// Purpose under which delayed forwards of this kind are recorded.
    fn debounce_purpose(&self) -> Option<DebouncePurpose> {
        None
    }

    /// Purpose of the pending forwards this kind cancels.
    fn contradicts(&self) -> Option<DebouncePurpose> {
        None
    }

    /// Whether messages are built separately for every destination guild.
    fn guild_scoped(&self) -> bool {
        false
    }

    /// Whether the kind is triggered by a player, so ignore rules apply.
    fn player_driven(&self) -> bool {
        true
    }

    /// Player-authored text that gets mention rewriting.
    fn mention_text<'a>(&self, _payload: &'a ForwardPayload) -> Option<&'a str> {
        None
    }

    /// Builds the cancellable pre-delivery notification.
    fn build_post_process(
        &self,
        request: &ForwardRequest,
        config: &ChannelConfig,
        guild_id: Option<GuildId>,
        destinations: Vec<DestinationChannel>,
        message: OutgoingMessage,
    ) -> PostProcessEvent {
        PostProcessEvent::new(request, config.name().clone(), destinations, message)
            .for_guild(guild_id)
    }

    /// Builds the post-delivery notification.
    fn build_delivered(
        &self,
        request: &ForwardRequest,
        config: &ChannelConfig,
        guild_id: Option<GuildId>,
        cluster: DeliveryCluster,
    ) -> DeliveredEvent {
        DeliveredEvent::new(request, config.name().clone(), cluster).for_guild(guild_id)
    }
}

static CHAT: ChatStrategy = ChatStrategy;
static JOIN: JoinStrategy = JoinStrategy;
static LEAVE: LeaveStrategy = LeaveStrategy;
static DEATH: DeathStrategy = DeathStrategy;
static AWARD: AwardStrategy = AwardStrategy;
static SERVER_SWITCH: ServerSwitchStrategy = ServerSwitchStrategy;
static START: LifecycleStrategy = LifecycleStrategy::start();
static STOP: LifecycleStrategy = LifecycleStrategy::stop();

/// Returns the strategy for `kind`.
#[must_use]
pub fn strategy_for(kind: MessageKind) -> &'static dyn MessageKindStrategy {
    match kind {
        MessageKind::Chat => &CHAT,
        MessageKind::Join => &JOIN,
        MessageKind::Leave => &LEAVE,
        MessageKind::Death => &DEATH,
        MessageKind::Award => &AWARD,
        MessageKind::ServerSwitch => &SERVER_SWITCH,
        MessageKind::Start => &START,
        MessageKind::Stop => &STOP,
    }
}

fn simple_settings(settings: &MessageSettings, default_template: &str) -> KindSettings {
    let template = settings
        .template
        .clone()
        .unwrap_or_else(|| MessageTemplate::new(default_template));
    KindSettings::new(settings.enabled, template)
}
