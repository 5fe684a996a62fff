//! Shared fixtures for in-memory forwarding integration tests.

use mockable::DefaultClock;
use std::error::Error;
use std::sync::{Arc, Mutex};
use switchboard::forwarding::{
    adapters::{
        BridgeConfig, InMemoryEventBus, InMemoryMessageSender, InMemorySenderPermissions,
        PercentPlaceholderFormatter, StaticChannelConfigSource, StaticDestinationResolver,
    },
    domain::{Player, PlayerId},
    ports::{ErrorReporter, SendError},
    services::{ForwardingPipeline, PipelinePorts},
};
use switchboard::mention::{adapters::InMemoryGuildDirectory, services::MentionCache};
use switchboard::platform::{ChannelId, ChannelPermission, DestinationChannel, GuildId};

/// Boxed error used by fallible tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error + Send + Sync>>;

/// Error reporter that keeps every report for later assertions.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<String>>,
}

impl RecordingReporter {
    /// Returns the recorded `context: error` lines.
    pub fn reports(&self) -> Vec<String> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, context: &str, error: &SendError) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(format!("{context}: {error}"));
        }
    }
}

/// A pipeline wired to in-memory adapters.
pub struct Bridge {
    /// Pipeline under test.
    pub pipeline: ForwardingPipeline<DefaultClock>,
    /// Destination channel registry.
    pub resolver: Arc<StaticDestinationResolver>,
    /// Recording sender.
    pub sender: Arc<InMemoryMessageSender<DefaultClock>>,
    /// Event bus with hooks and recorded events.
    pub bus: Arc<InMemoryEventBus>,
    /// Recorded send failures.
    pub reporter: Arc<RecordingReporter>,
}

impl Bridge {
    /// Builds a bridge from a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is invalid.
    pub fn from_toml(document: &str) -> TestResult<Self> {
        let configs = BridgeConfig::from_toml_str(document)?.into_channel_configs()?;
        let clock = Arc::new(DefaultClock);
        let resolver = Arc::new(StaticDestinationResolver::new());
        let sender = Arc::new(InMemoryMessageSender::new(Arc::clone(&clock)));
        let bus = Arc::new(InMemoryEventBus::new());
        let reporter = Arc::new(RecordingReporter::default());
        let pipeline = ForwardingPipeline::new(
            PipelinePorts {
                configs: Arc::new(StaticChannelConfigSource::new(configs)),
                resolver: resolver.clone(),
                formatter: Arc::new(PercentPlaceholderFormatter::new()),
                bus: bus.clone(),
                sender: sender.clone(),
                reporter: reporter.clone(),
                permissions: Arc::new(InMemorySenderPermissions::new()),
                mentions: Arc::new(MentionCache::new(Arc::new(InMemoryGuildDirectory::new()))),
            },
            clock,
        );
        Ok(Self {
            pipeline,
            resolver,
            sender,
            bus,
            reporter,
        })
    }

    /// Registers destination channels with the resolver.
    ///
    /// # Errors
    ///
    /// Returns an error when the resolver state is unavailable.
    pub fn register(&self, channels: impl IntoIterator<Item = DestinationChannel>) -> TestResult {
        for channel in channels {
            self.resolver.register(channel)?;
        }
        Ok(())
    }

    /// Returns the contents sent into channel `id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error when the sender state is unavailable.
    pub fn sent_to(&self, id: u64) -> TestResult<Vec<String>> {
        Ok(self.sender.sent_to(ChannelId::new(id))?)
    }
}

/// A text channel the bot can view and post into.
pub fn text_channel(id: u64, guild: u64) -> DestinationChannel {
    DestinationChannel::new(ChannelId::new(id), GuildId::new(guild), format!("relay-{id}"))
        .with_permissions([ChannelPermission::ViewChannel, ChannelPermission::SendMessages])
}

/// A player with a fresh identity.
pub fn player(name: &str) -> Player {
    Player::new(PlayerId::new(), name)
}
