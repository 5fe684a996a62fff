//! Domain model for forwarding game events into guild channels.
//!
//! Requests, channel configuration, rendered messages, delivery results,
//! and bus notifications live here. Infrastructure concerns remain outside
//! this boundary.

mod config;
mod delivery;
mod error;
mod events;
mod ids;
mod message;
mod placeholders;
mod player;
mod request;

pub use config::{
    ChannelConfig, IgnoreRules, JoinSettings, KindSettings, LeaveSettings, MessageSettings,
    MessageTemplate,
};
pub use delivery::{DeliveryCluster, DeliveryOutcome, DeliveryResult};
pub use error::ForwardingDomainError;
pub use events::{DeliveredEvent, PostProcessEvent};
pub use ids::{DEFAULT_GAME_CHANNEL, GameChannelName, PlayerId};
pub use message::{OutgoingMessage, ReceivedMessage, RenderedMessage};
pub use placeholders::{PlaceholderValue, Placeholders};
pub use player::Player;
pub use request::{ForwardPayload, ForwardRequest, MessageKind, RequestState};
