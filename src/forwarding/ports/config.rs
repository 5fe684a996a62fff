//! Read-only access to channel configuration.

use crate::forwarding::domain::{ChannelConfig, GameChannelName};
use std::sync::Arc;

/// Supplies immutable per-game-channel settings.
pub trait ChannelConfigSource: Send + Sync {
    /// Returns every configured game channel.
    fn channels(&self) -> Vec<Arc<ChannelConfig>>;

    /// Returns the configuration for one game channel.
    fn channel(&self, name: &GameChannelName) -> Option<Arc<ChannelConfig>>;
}
