//! Port contracts for the collaborators the forwarding pipeline drives.

mod config;
mod destination;
mod event_bus;
mod formatter;
mod permissions;
mod reporter;
mod sender;

pub use config::ChannelConfigSource;
pub use destination::{
    DestinationResolver, ResolveError, ResolveResult, ResolvedDestinations,
};
pub use event_bus::{EventBusError, EventBusResult, ForwardEventBus};
pub use formatter::{FormatError, FormatResult, MessageFormatter};
pub use permissions::SenderPermissions;
pub use reporter::ErrorReporter;
pub use sender::{MessageSender, SendError, SendResult};

#[cfg(test)]
pub use permissions::MockSenderPermissions;
#[cfg(test)]
pub use reporter::MockErrorReporter;
