//! Fixed channel configuration source.

use crate::forwarding::domain::{ChannelConfig, GameChannelName};
use crate::forwarding::ports::ChannelConfigSource;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Serves a fixed set of channel configurations.
#[derive(Debug, Clone, Default)]
pub struct StaticChannelConfigSource {
    channels: BTreeMap<GameChannelName, Arc<ChannelConfig>>,
}

impl StaticChannelConfigSource {
    /// Creates a source from configurations; later duplicates win.
    #[must_use]
    pub fn new(configs: impl IntoIterator<Item = ChannelConfig>) -> Self {
        let channels = configs
            .into_iter()
            .map(|config| (config.name().clone(), Arc::new(config)))
            .collect();
        Self { channels }
    }
}

impl ChannelConfigSource for StaticChannelConfigSource {
    fn channels(&self) -> Vec<Arc<ChannelConfig>> {
        self.channels.values().cloned().collect()
    }

    fn channel(&self, name: &GameChannelName) -> Option<Arc<ChannelConfig>> {
        self.channels.get(name).cloned()
    }
}
