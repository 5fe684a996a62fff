//! The forwarding pipeline: one generic flow specialized per message kind.

use super::{
    ChannelForward, DebounceOutcome, DebounceRegistry, DeliveryExecutor, ForwardError,
    ForwardOutcome, ForwardReport, NoOpReason, ResultAggregator,
};
use crate::forwarding::domain::{
    ChannelConfig, ForwardRequest, GameChannelName, KindSettings, OutgoingMessage, Placeholders,
    Player, RequestState,
};
use crate::forwarding::kinds::{MessageKindStrategy, strategy_for};
use crate::forwarding::ports::{
    ChannelConfigSource, DestinationResolver, ErrorReporter, ForwardEventBus, MessageFormatter,
    MessageSender, SenderPermissions,
};
use crate::mention::domain::{
    AllowedMentionSet, MentionError, MentionPermission, MentionToggles,
};
use crate::mention::services::{MentionCache, MentionGate, MentionRewrite, rewrite};
use crate::platform::{DestinationChannel, GuildId};
use futures::future::join_all;
use mockable::Clock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

/// Collaborators the pipeline drives.
pub struct PipelinePorts {
    /// Channel configuration.
    pub configs: Arc<dyn ChannelConfigSource>,
    /// Destination lookup.
    pub resolver: Arc<dyn DestinationResolver>,
    /// Template formatting.
    pub formatter: Arc<dyn MessageFormatter>,
    /// Notification bus.
    pub bus: Arc<dyn ForwardEventBus>,
    /// Platform sends.
    pub sender: Arc<dyn MessageSender>,
    /// Diagnostics for failed sends.
    pub reporter: Arc<dyn ErrorReporter>,
    /// Sender mention permissions.
    pub permissions: Arc<dyn SenderPermissions>,
    /// Shared mention cache.
    pub mentions: Arc<MentionCache>,
}

/// Forwards game events into guild channels.
///
/// Cloning is cheap; clones share the debounce registry and every port.
pub struct ForwardingPipeline<C>
where
    C: Clock + Send + Sync + 'static,
{
    inner: Arc<PipelineInner<C>>,
}

struct PipelineInner<C>
where
    C: Clock + Send + Sync + 'static,
{
    configs: Arc<dyn ChannelConfigSource>,
    resolver: Arc<dyn DestinationResolver>,
    formatter: Arc<dyn MessageFormatter>,
    bus: Arc<dyn ForwardEventBus>,
    permissions: Arc<dyn SenderPermissions>,
    mentions: Arc<MentionCache>,
    executor: DeliveryExecutor,
    aggregator: ResultAggregator,
    debounce: DebounceRegistry<C>,
    clock: Arc<C>,
}

impl<C> Clone for ForwardingPipeline<C>
where
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// A guild's message, ready to send.
struct ReadyBatch {
    guild_id: Option<GuildId>,
    channels: Vec<DestinationChannel>,
    message: Arc<OutgoingMessage>,
}

enum Prepared {
    Ready(ReadyBatch),
    Empty,
    Cancelled,
}

/// Per-guild preparation results of one channel-config forward.
struct Preparation {
    ready: Vec<ReadyBatch>,
    errors: Vec<(Option<GuildId>, ForwardError)>,
    cancelled: bool,
}

impl Preparation {
    fn collect(prepared: Vec<(Option<GuildId>, Result<Prepared, ForwardError>)>) -> Self {
        let mut collected = Self {
            ready: Vec::new(),
            errors: Vec::new(),
            cancelled: false,
        };
        for (guild_id, result) in prepared {
            match result {
                Ok(Prepared::Ready(batch)) => collected.ready.push(batch),
                Ok(Prepared::Cancelled) => collected.cancelled = true,
                Ok(Prepared::Empty) => {}
                Err(err) => collected.errors.push((guild_id, err)),
            }
        }
        collected
    }

    /// Outcome when no guild produced a message to send.
    ///
    /// A single failure is returned as is; failures in several guilds are
    /// returned together.
    fn into_idle_outcome(self) -> Result<ForwardOutcome, ForwardError> {
        let mut errors = self.errors;
        if errors.len() > 1 {
            return Err(ForwardError::Guilds(errors));
        }
        if let Some((_, err)) = errors.pop() {
            return Err(err);
        }
        if self.cancelled {
            Ok(ForwardOutcome::CancelledByListener)
        } else {
            Ok(ForwardOutcome::Skipped(NoOpReason::EmptyMessage))
        }
    }

    /// The guild every ready channel belongs to, if there is exactly one.
    fn single_guild(&self) -> Option<GuildId> {
        let guilds: BTreeSet<GuildId> = self
            .ready
            .iter()
            .flat_map(|batch| batch.channels.iter().map(DestinationChannel::guild_id))
            .collect();
        match (guilds.len(), guilds.first()) {
            (1, Some(guild_id)) => Some(*guild_id),
            _ => None,
        }
    }
}

impl<C> ForwardingPipeline<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates a pipeline over `ports`.
    #[must_use]
    pub fn new(ports: PipelinePorts, clock: Arc<C>) -> Self {
        let PipelinePorts {
            configs,
            resolver,
            formatter,
            bus,
            sender,
            reporter,
            permissions,
            mentions,
        } = ports;
        Self {
            inner: Arc::new(PipelineInner {
                executor: DeliveryExecutor::new(sender, reporter),
                aggregator: ResultAggregator::new(Arc::clone(&bus)),
                debounce: DebounceRegistry::new(Arc::clone(&clock)),
                configs,
                resolver,
                formatter,
                bus,
                permissions,
                mentions,
                clock,
            }),
        }
    }

    /// Returns the debounce registry.
    #[must_use]
    pub fn debounce(&self) -> &DebounceRegistry<C> {
        &self.inner.debounce
    }

    /// Returns the mention cache.
    #[must_use]
    pub fn mentions(&self) -> &MentionCache {
        &self.inner.mentions
    }

    /// Forwards `request` into its game channel, or into every configured
    /// game channel when it names none.
    ///
    /// Never fails: per-channel errors are logged once for the whole
    /// request and returned in the report.
    pub async fn process(&self, request: &ForwardRequest) -> ForwardReport {
        let kind = request.kind();
        if let Err(state) = request.mark_processed() {
            let reason = match state {
                RequestState::Cancelled => NoOpReason::Cancelled,
                RequestState::Processed | RequestState::Pending => NoOpReason::AlreadyProcessed,
            };
            tracing::debug!(%kind, %reason, "forward is a no-op");
            return ForwardReport::skipped(kind, reason);
        }

        let configs = match self.select_configs(request) {
            Ok(configs) => configs,
            Err(reason) => {
                tracing::debug!(
                    %kind,
                    game_channel = ?request.game_channel().map(GameChannelName::as_str),
                    %reason,
                    "forward is a no-op"
                );
                return ForwardReport::skipped(kind, reason);
            }
        };

        let strategy = strategy_for(kind);
        let suppressed = self.cancel_contradicted(strategy, request);
        let mut forwards = Vec::with_capacity(configs.len());
        for config in configs {
            let suppress = suppressed.contains(config.name());
            forwards.push(self.forward_channel(strategy, request, config, suppress));
        }
        let channels = join_all(forwards).await;

        let report = ForwardReport::for_channels(kind, channels);
        log_failures(&report);
        report
    }

    fn select_configs(
        &self,
        request: &ForwardRequest,
    ) -> Result<Vec<Arc<ChannelConfig>>, NoOpReason> {
        match request.game_channel() {
            Some(name) => self
                .inner
                .configs
                .channel(name)
                .map(|config| vec![config])
                .ok_or(NoOpReason::ChannelNotConfigured),
            None => {
                let configs = self.inner.configs.channels();
                if configs.is_empty() {
                    Err(NoOpReason::NoChannelsConfigured)
                } else {
                    Ok(configs)
                }
            }
        }
    }

    fn cancel_contradicted(
        &self,
        strategy: &dyn MessageKindStrategy,
        request: &ForwardRequest,
    ) -> BTreeSet<GameChannelName> {
        let (Some(purpose), Some(player)) = (strategy.contradicts(), request.player()) else {
            return BTreeSet::new();
        };
        let cancelled: BTreeSet<_> = self
            .inner
            .debounce
            .cancel(player.id(), purpose)
            .into_iter()
            .collect();
        if !cancelled.is_empty() {
            tracing::info!(
                kind = %strategy.kind(),
                player = player.name(),
                ?purpose,
                channels = cancelled.len(),
                "suppressed forwards reversed inside their debounce window"
            );
        }
        cancelled
    }

    async fn forward_channel(
        &self,
        strategy: &'static dyn MessageKindStrategy,
        request: &ForwardRequest,
        config: Arc<ChannelConfig>,
        suppress: bool,
    ) -> ChannelForward {
        let game_channel = config.name().clone();
        let result = if suppress {
            Ok(ForwardOutcome::Suppressed)
        } else {
            self.forward_config(strategy, request, config).await
        };
        ChannelForward {
            game_channel,
            result,
        }
    }

    async fn forward_config(
        &self,
        strategy: &'static dyn MessageKindStrategy,
        request: &ForwardRequest,
        config: Arc<ChannelConfig>,
    ) -> Result<ForwardOutcome, ForwardError> {
        let settings = strategy.map_config(&config, request.payload());
        if let Some(reason) = skip_reason(strategy, request, &config, &settings) {
            tracing::debug!(
                kind = %strategy.kind(),
                game_channel = %config.name(),
                %reason,
                "forward is a no-op"
            );
            return Ok(ForwardOutcome::Skipped(reason));
        }

        let delayed = strategy
            .debounce_purpose()
            .zip(request.player())
            .filter(|_| !settings.delay.is_zero());
        let Some((purpose, player)) = delayed else {
            return self.deliver(strategy, request, &config, &settings).await;
        };

        let retain = self.retention(strategy, request);
        let game_channel = config.name().clone();
        let delay = settings.delay;
        let pipeline = self.clone();
        let owned_request = request.clone();
        let handle = self.inner.debounce.schedule(
            player.id(),
            purpose,
            game_channel.clone(),
            delay,
            retain,
            async move {
                pipeline
                    .deliver(strategy, &owned_request, &config, &settings)
                    .await
            },
        );

        match handle.wait().await? {
            DebounceOutcome::Fired(result) => result,
            DebounceOutcome::Suppressed => {
                tracing::info!(
                    kind = %strategy.kind(),
                    game_channel = %game_channel,
                    player = player.name(),
                    "debounced forward suppressed by a contradicting event"
                );
                Ok(ForwardOutcome::Suppressed)
            }
        }
    }

    /// Longest debounce window configured for the kind in any channel.
    fn retention(&self, strategy: &dyn MessageKindStrategy, request: &ForwardRequest) -> Duration {
        self.inner
            .configs
            .channels()
            .iter()
            .map(|config| strategy.map_config(config, request.payload()).delay)
            .max()
            .unwrap_or_default()
    }

    async fn deliver(
        &self,
        strategy: &dyn MessageKindStrategy,
        request: &ForwardRequest,
        config: &ChannelConfig,
        settings: &KindSettings,
    ) -> Result<ForwardOutcome, ForwardError> {
        let kind = strategy.kind();
        let resolved = self.resolve(strategy, config).await?;
        if resolved.is_empty() {
            tracing::debug!(%kind, game_channel = %config.name(), "no destinations resolved");
            return Ok(ForwardOutcome::Skipped(NoOpReason::NoDestinations));
        }

        let groups = if strategy.guild_scoped() {
            group_by_guild(resolved)
        } else {
            vec![(None, resolved)]
        };
        let mut preparing = Vec::with_capacity(groups.len());
        for (guild_id, group) in groups {
            preparing.push(self.prepare(strategy, request, config, settings, guild_id, group));
        }
        let prepared = Preparation::collect(join_all(preparing).await);

        for (guild_id, err) in &prepared.errors {
            tracing::error!(
                %kind,
                game_channel = %config.name(),
                guild_id = ?guild_id.map(GuildId::get),
                error = %err,
                "failed to build message for guild"
            );
        }
        if prepared.ready.is_empty() {
            return prepared.into_idle_outcome();
        }

        let delivered_guild = prepared.single_guild();
        let mut deliveries = Vec::with_capacity(prepared.ready.len());
        for batch in prepared.ready {
            tracing::trace!(
                guild_id = ?batch.guild_id.map(GuildId::get),
                channels = batch.channels.len(),
                "delivering"
            );
            deliveries.push(self.inner.executor.send_all(batch.channels, batch.message));
        }
        let cluster = self
            .inner
            .aggregator
            .aggregate(deliveries, |delivered| {
                strategy.build_delivered(request, config, delivered_guild, delivered)
            })
            .await;

        Ok(cluster.map_or(ForwardOutcome::Undelivered, ForwardOutcome::Delivered))
    }

    /// Resolves the config's destinations, logging partial failures.
    async fn resolve(
        &self,
        strategy: &dyn MessageKindStrategy,
        config: &ChannelConfig,
    ) -> Result<Vec<DestinationChannel>, ForwardError> {
        let resolved = self.inner.resolver.resolve(config).await?;
        if !resolved.errors.is_empty() {
            let errors = resolved
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            tracing::warn!(
                kind = %strategy.kind(),
                game_channel = %config.name(),
                failed = resolved.errors.len(),
                resolved = resolved.channels.len(),
                %errors,
                "some destinations could not be resolved"
            );
        }
        Ok(resolved.channels)
    }

    async fn prepare(
        &self,
        strategy: &dyn MessageKindStrategy,
        request: &ForwardRequest,
        config: &ChannelConfig,
        settings: &KindSettings,
        guild_id: Option<GuildId>,
        channels: Vec<DestinationChannel>,
    ) -> (Option<GuildId>, Result<Prepared, ForwardError>) {
        let result = self
            .build_message(strategy, request, config, settings, guild_id, channels)
            .await;
        (guild_id, result)
    }

    /// Builds one guild's message and runs it past post-process listeners.
    async fn build_message(
        &self,
        strategy: &dyn MessageKindStrategy,
        request: &ForwardRequest,
        config: &ChannelConfig,
        settings: &KindSettings,
        guild_id: Option<GuildId>,
        channels: Vec<DestinationChannel>,
    ) -> Result<Prepared, ForwardError> {
        let mut placeholders = self.placeholders(strategy, request, config);
        let mut allowed = AllowedMentionSet::none();
        if let (Some(guild), Some(text)) = (guild_id, strategy.mention_text(request.payload())) {
            let (content, declaration) = self
                .rewrite_mentions(guild, request.player(), &config.mentions, text)
                .await?
                .into_parts();
            placeholders.insert("message", content);
            allowed = declaration;
        }

        let Some(rendered) = self
            .inner
            .formatter
            .format(&settings.template, &placeholders)?
        else {
            tracing::debug!(
                kind = %strategy.kind(),
                game_channel = %config.name(),
                "template rendered an empty message"
            );
            return Ok(Prepared::Empty);
        };
        let outgoing = OutgoingMessage::new(rendered, allowed).neutralized()?;

        if request.is_cancelled() {
            return Ok(Prepared::Cancelled);
        }
        let original = strategy.build_post_process(request, config, guild_id, channels, outgoing);
        let event = match self.inner.bus.publish_post_process(original.clone()).await {
            Ok(processed) => processed,
            Err(err) => {
                tracing::warn!(
                    kind = %strategy.kind(),
                    error = %err,
                    "failed to publish post-process event; sending unmodified message"
                );
                original
            }
        };
        if event.is_cancelled() || request.is_cancelled() {
            tracing::debug!(
                kind = %strategy.kind(),
                game_channel = %config.name(),
                "forward cancelled by a listener"
            );
            return Ok(Prepared::Cancelled);
        }

        let (destinations, edited) = event.into_delivery();
        if destinations.is_empty() {
            return Ok(Prepared::Cancelled);
        }
        Ok(Prepared::Ready(ReadyBatch {
            guild_id,
            channels: destinations,
            message: Arc::new(edited.neutralized()?),
        }))
    }

    async fn rewrite_mentions(
        &self,
        guild_id: GuildId,
        player: Option<&Player>,
        toggles: &MentionToggles,
        text: &str,
    ) -> Result<MentionRewrite, MentionError> {
        let descriptors = match self.inner.mentions.guild(guild_id).await {
            Ok(mentions) => {
                if toggles.uncached_users
                    && let Err(err) = self.inner.mentions.resolve_uncached(guild_id, text).await
                {
                    tracing::warn!(
                        guild_id = %guild_id,
                        error = %err,
                        "uncached mention lookup failed; using cached mentions"
                    );
                }
                mentions.descriptors()
            }
            Err(err) => {
                tracing::warn!(
                    guild_id = %guild_id,
                    error = %err,
                    "mention cache unavailable; forwarding without live mentions"
                );
                Vec::new()
            }
        };

        let permissions = &self.inner.permissions;
        let gate = MentionGate::new(*toggles, |permission: &MentionPermission| {
            player.is_some_and(|sender| permissions.has_permission(sender, guild_id, permission))
        });
        rewrite(text, &descriptors, &gate)
    }

    fn placeholders(
        &self,
        strategy: &dyn MessageKindStrategy,
        request: &ForwardRequest,
        config: &ChannelConfig,
    ) -> Placeholders {
        let mut placeholders = Placeholders::new();
        placeholders.insert("game_channel", config.name().as_str());
        placeholders.insert("message_kind", strategy.kind().as_str());
        if let Some(player) = request.player() {
            placeholders.insert("player_name", player.name());
            placeholders.insert("player_display_name", player.display_name());
            placeholders.insert("player_uuid", player.id().to_string());
            placeholders.insert("player_avatar_url", player.avatar_url().unwrap_or_default());
        }
        let clock = Arc::clone(&self.inner.clock);
        placeholders.insert_lazy("date", move || clock.utc().to_rfc3339());
        strategy.set_placeholders(request.payload(), &mut placeholders);
        placeholders
    }
}

fn skip_reason(
    strategy: &dyn MessageKindStrategy,
    request: &ForwardRequest,
    config: &ChannelConfig,
    settings: &KindSettings,
) -> Option<NoOpReason> {
    if !settings.enabled {
        return Some(NoOpReason::Disabled);
    }
    if settings.template.is_empty() {
        return Some(NoOpReason::EmptyTemplate);
    }
    if strategy.player_driven()
        && request
            .player()
            .is_some_and(|player| config.ignores.ignores(player))
    {
        return Some(NoOpReason::Ignored);
    }
    if request.is_silent() && !settings.forward_silent {
        return Some(NoOpReason::Silent);
    }
    None
}

fn group_by_guild(
    channels: Vec<DestinationChannel>,
) -> Vec<(Option<GuildId>, Vec<DestinationChannel>)> {
    let mut groups: BTreeMap<GuildId, Vec<DestinationChannel>> = BTreeMap::new();
    for channel in channels {
        groups.entry(channel.guild_id()).or_default().push(channel);
    }
    groups
        .into_iter()
        .map(|(guild_id, members)| (Some(guild_id), members))
        .collect()
}

fn log_failures(report: &ForwardReport) {
    let failures: Vec<String> = report
        .failures()
        .map(|(game_channel, err)| format!("{game_channel}: {err}"))
        .collect();
    if failures.is_empty() {
        return;
    }
    tracing::error!(
        kind = %report.kind(),
        failed = failures.len(),
        errors = %failures.join("; "),
        "forward failed"
    );
}
