//! Messaging-platform value types shared by the mention and forwarding
//! modules.
//!
//! The platform client itself (gateway, REST, webhook management) lives
//! outside this crate. These types describe only what the forwarding core
//! needs to know about guilds and channels.

mod channel;
mod ids;

pub use channel::{ChannelKind, ChannelPermission, DeliveryMode, DestinationChannel};
pub use ids::{ChannelId, GuildId, MessageId, RoleId, UserId};
