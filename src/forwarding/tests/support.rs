//! Shared pipeline fixtures.

use crate::forwarding::{
    adapters::{
        InMemoryEventBus, InMemoryMessageSender, InMemorySenderPermissions,
        PercentPlaceholderFormatter, StaticChannelConfigSource, StaticDestinationResolver,
        TracingErrorReporter,
    },
    domain::{ChannelConfig, GameChannelName, Player, PlayerId},
    ports::{DestinationResolver, MessageFormatter},
    services::{ForwardOutcome, ForwardReport, ForwardingPipeline, PipelinePorts},
};
use crate::mention::{adapters::InMemoryGuildDirectory, services::MentionCache};
use crate::platform::{ChannelId, ChannelPermission, DestinationChannel, GuildId};
use mockable::DefaultClock;
use std::sync::Arc;

pub(super) type TestPipeline = ForwardingPipeline<DefaultClock>;

pub(super) struct Harness {
    pub(super) pipeline: TestPipeline,
    pub(super) resolver: Arc<StaticDestinationResolver>,
    pub(super) sender: Arc<InMemoryMessageSender<DefaultClock>>,
    pub(super) bus: Arc<InMemoryEventBus>,
    pub(super) permissions: Arc<InMemorySenderPermissions>,
    pub(super) directory: Arc<InMemoryGuildDirectory>,
}

impl Harness {
    pub(super) fn new(configs: Vec<ChannelConfig>) -> Self {
        let resolver = Arc::new(StaticDestinationResolver::new());
        Self::with_resolver(configs, resolver.clone(), resolver)
    }

    pub(super) fn with_resolver(
        configs: Vec<ChannelConfig>,
        resolver: Arc<StaticDestinationResolver>,
        port: Arc<dyn DestinationResolver>,
    ) -> Self {
        Self::build(configs, resolver, port, Arc::new(PercentPlaceholderFormatter::new()))
    }

    pub(super) fn with_formatter(
        configs: Vec<ChannelConfig>,
        formatter: Arc<dyn MessageFormatter>,
    ) -> Self {
        let resolver = Arc::new(StaticDestinationResolver::new());
        Self::build(configs, resolver.clone(), resolver, formatter)
    }

    fn build(
        configs: Vec<ChannelConfig>,
        resolver: Arc<StaticDestinationResolver>,
        port: Arc<dyn DestinationResolver>,
        formatter: Arc<dyn MessageFormatter>,
    ) -> Self {
        let clock = Arc::new(DefaultClock);
        let sender = Arc::new(InMemoryMessageSender::new(Arc::clone(&clock)));
        let bus = Arc::new(InMemoryEventBus::new());
        let permissions = Arc::new(InMemorySenderPermissions::new());
        let directory = Arc::new(InMemoryGuildDirectory::new());
        let pipeline = ForwardingPipeline::new(
            PipelinePorts {
                configs: Arc::new(StaticChannelConfigSource::new(configs)),
                resolver: port,
                formatter,
                bus: bus.clone(),
                sender: sender.clone(),
                reporter: Arc::new(TracingErrorReporter),
                permissions: permissions.clone(),
                mentions: Arc::new(MentionCache::new(directory.clone())),
            },
            clock,
        );
        Self {
            pipeline,
            resolver,
            sender,
            bus,
            permissions,
            directory,
        }
    }

    pub(super) fn register(&self, channel: DestinationChannel) {
        self.resolver.register(channel).expect("register channel");
    }

    pub(super) fn sent_to(&self, id: u64) -> Vec<String> {
        self.sender.sent_to(ChannelId::new(id)).expect("sent messages")
    }
}

pub(super) fn text_channel(id: u64, guild: u64) -> DestinationChannel {
    DestinationChannel::new(ChannelId::new(id), GuildId::new(guild), format!("relay-{id}"))
        .with_permissions([ChannelPermission::ViewChannel, ChannelPermission::SendMessages])
}

pub(super) fn channel_name(name: &str) -> GameChannelName {
    GameChannelName::new(name).expect("valid game channel")
}

pub(super) fn config(name: &str, destinations: &[u64]) -> ChannelConfig {
    ChannelConfig::new(channel_name(name))
        .with_destinations(destinations.iter().copied().map(ChannelId::new))
}

pub(super) fn steve() -> Player {
    Player::new(PlayerId::new(), "Steve")
}

pub(super) fn outcome(report: &ForwardReport, name: &str) -> ForwardOutcome {
    report
        .outcome_for(&channel_name(name))
        .expect("channel in report")
        .clone()
        .expect("forward should not fail")
}
