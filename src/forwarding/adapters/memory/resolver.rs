//! Destination resolver backed by a fixed channel table.

use crate::forwarding::domain::ChannelConfig;
use crate::forwarding::ports::{
    DestinationResolver, ResolveError, ResolveResult, ResolvedDestinations,
};
use crate::platform::{ChannelId, DestinationChannel};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Resolves configured channel ids against registered channel handles.
///
/// Ids without a registered handle are reported as partial failures.
#[derive(Debug, Clone, Default)]
pub struct StaticDestinationResolver {
    channels: Arc<RwLock<HashMap<ChannelId, DestinationChannel>>>,
    offline: Arc<AtomicBool>,
}

impl StaticDestinationResolver {
    /// Creates a resolver with no known channels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resolvable channel.
    ///
    /// # Errors
    ///
    /// Returns a platform error when lock acquisition fails.
    pub fn register(&self, channel: DestinationChannel) -> ResolveResult<()> {
        let mut channels = self
            .channels
            .write()
            .map_err(|err| ResolveError::platform(std::io::Error::other(err.to_string())))?;
        channels.insert(channel.id(), channel);
        Ok(())
    }

    /// Makes every resolution fail outright.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Release);
    }
}

#[async_trait]
impl DestinationResolver for StaticDestinationResolver {
    async fn resolve(&self, config: &ChannelConfig) -> ResolveResult<ResolvedDestinations> {
        if self.offline.load(Ordering::Acquire) {
            return Err(ResolveError::platform(std::io::Error::other(
                "platform unavailable",
            )));
        }
        let channels = self
            .channels
            .read()
            .map_err(|err| ResolveError::platform(std::io::Error::other(err.to_string())))?;

        let mut resolved = ResolvedDestinations::default();
        for id in &config.destinations {
            match channels.get(id) {
                Some(channel) => resolved.channels.push(channel.clone()),
                None => resolved.errors.push(ResolveError::UnknownChannel(*id)),
            }
        }
        Ok(resolved)
    }
}
