//! Shared world state for delivery isolation BDD scenarios.

use std::sync::{Arc, Mutex};

use mockable::DefaultClock;
use rstest::fixture;
use switchboard::forwarding::{
    adapters::{
        InMemoryEventBus, InMemoryMessageSender, InMemorySenderPermissions,
        PercentPlaceholderFormatter, StaticChannelConfigSource, StaticDestinationResolver,
    },
    domain::ChannelConfig,
    ports::{ErrorReporter, SendError},
    services::{ForwardReport, ForwardingPipeline, PipelinePorts},
};
use switchboard::mention::{adapters::InMemoryGuildDirectory, services::MentionCache};
use switchboard::platform::{ChannelId, ChannelPermission, DestinationChannel, GuildId};

/// Guild every scenario channel belongs to.
pub const GUILD: GuildId = GuildId::new(10);

/// Pipeline type used by the BDD world.
pub type TestPipeline = ForwardingPipeline<DefaultClock>;

/// Counts reported send failures.
#[derive(Debug, Default)]
pub struct CountingReporter {
    reports: Mutex<usize>,
}

impl CountingReporter {
    /// Returns how many failures were reported.
    pub fn count(&self) -> usize {
        self.reports.lock().map(|count| *count).unwrap_or_default()
    }
}

impl ErrorReporter for CountingReporter {
    fn report(&self, _context: &str, _error: &SendError) {
        if let Ok(mut count) = self.reports.lock() {
            *count += 1;
        }
    }
}

/// Scenario world for delivery isolation behaviour tests.
pub struct DeliveryWorld {
    /// Game channels configured so far.
    pub configs: Vec<ChannelConfig>,
    /// Destination channel registry.
    pub resolver: Arc<StaticDestinationResolver>,
    /// Recording sender.
    pub sender: Arc<InMemoryMessageSender<DefaultClock>>,
    /// Event bus with subscriber hooks.
    pub bus: Arc<InMemoryEventBus>,
    /// Failure counter.
    pub reporter: Arc<CountingReporter>,
    /// Report of the last forward.
    pub last_report: Option<ForwardReport>,
}

impl DeliveryWorld {
    /// Creates a world with no game channels.
    #[must_use]
    pub fn new() -> Self {
        Self {
            configs: Vec::new(),
            resolver: Arc::new(StaticDestinationResolver::new()),
            sender: Arc::new(InMemoryMessageSender::new(Arc::new(DefaultClock))),
            bus: Arc::new(InMemoryEventBus::new()),
            reporter: Arc::new(CountingReporter::default()),
            last_report: None,
        }
    }

    /// Builds a pipeline over the world's current state.
    pub fn pipeline(&self) -> TestPipeline {
        ForwardingPipeline::new(
            PipelinePorts {
                configs: Arc::new(StaticChannelConfigSource::new(self.configs.clone())),
                resolver: self.resolver.clone(),
                formatter: Arc::new(PercentPlaceholderFormatter::new()),
                bus: self.bus.clone(),
                sender: self.sender.clone(),
                reporter: self.reporter.clone(),
                permissions: Arc::new(InMemorySenderPermissions::new()),
                mentions: Arc::new(MentionCache::new(Arc::new(InMemoryGuildDirectory::new()))),
            },
            Arc::new(DefaultClock),
        )
    }
}

impl Default for DeliveryWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DeliveryWorld {
    DeliveryWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// A channel handle with the given bot permissions.
pub fn channel(id: u64, permissions: &[ChannelPermission]) -> DestinationChannel {
    DestinationChannel::new(ChannelId::new(id), GUILD, format!("relay-{id}"))
        .with_permissions(permissions.iter().copied())
}
