//! Destination resolution port.

use crate::forwarding::domain::ChannelConfig;
use crate::platform::{ChannelId, DestinationChannel};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for destination resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Channels resolved for one channel configuration.
///
/// Resolution can succeed partially: `errors` lists the destinations that
/// could not be resolved alongside the ones that could.
#[derive(Debug, Clone, Default)]
pub struct ResolvedDestinations {
    /// Resolved channel handles.
    pub channels: Vec<DestinationChannel>,
    /// Per-destination failures.
    pub errors: Vec<ResolveError>,
}

/// Maps a channel configuration to concrete platform channels.
#[async_trait]
pub trait DestinationResolver: Send + Sync {
    /// Resolves the destinations of `config`.
    async fn resolve(&self, config: &ChannelConfig) -> ResolveResult<ResolvedDestinations>;
}

/// Errors returned by destination resolvers.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// The platform does not know the channel, or the bot cannot see it.
    #[error("destination channel {0} not found")]
    UnknownChannel(ChannelId),

    /// The platform lookup failed.
    #[error("destination lookup failed: {0}")]
    Platform(Arc<dyn std::error::Error + Send + Sync>),
}

impl ResolveError {
    /// Wraps a platform error.
    pub fn platform(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Platform(Arc::new(err))
    }
}
