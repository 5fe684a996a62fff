//! In-memory adapters for every forwarding port.

mod config_source;
mod event_bus;
mod permissions;
mod resolver;
mod sender;

pub use config_source::StaticChannelConfigSource;
pub use event_bus::InMemoryEventBus;
pub use permissions::InMemorySenderPermissions;
pub use resolver::StaticDestinationResolver;
pub use sender::InMemoryMessageSender;
