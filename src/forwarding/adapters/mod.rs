//! Adapters for forwarding ports.

pub mod config;
pub mod formatter;
pub mod memory;
pub mod reporter;

pub use config::{BridgeConfig, ConfigError};
pub use formatter::PercentPlaceholderFormatter;
pub use memory::{
    InMemoryEventBus, InMemoryMessageSender, InMemorySenderPermissions,
    StaticChannelConfigSource, StaticDestinationResolver,
};
pub use reporter::TracingErrorReporter;
