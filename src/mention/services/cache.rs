//! Per-guild mention cache kept current from platform change notifications.

use crate::mention::{
    domain::{MentionCacheEvent, MentionDescriptor, MentionError, MentionKind},
    ports::GuildDirectory,
};
use crate::platform::GuildId;
use dashmap::DashMap;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mention descriptors of one guild, one concurrent map per mention kind.
///
/// Readers on the forwarding path and writers applying platform events
/// work on sharded maps and do not block each other.
#[derive(Debug, Default)]
pub struct GuildMentions {
    users: DashMap<u64, MentionDescriptor>,
    roles: DashMap<u64, MentionDescriptor>,
    channels: DashMap<u64, MentionDescriptor>,
}

impl GuildMentions {
    fn from_descriptors(descriptors: impl IntoIterator<Item = MentionDescriptor>) -> Self {
        let mentions = Self::default();
        for descriptor in descriptors {
            mentions.upsert(descriptor);
        }
        mentions
    }

    const fn map_for(&self, kind: MentionKind) -> &DashMap<u64, MentionDescriptor> {
        match kind {
            MentionKind::User => &self.users,
            MentionKind::Role => &self.roles,
            MentionKind::Channel => &self.channels,
        }
    }

    /// Inserts or replaces a descriptor.
    pub fn upsert(&self, descriptor: MentionDescriptor) {
        self.map_for(descriptor.kind())
            .insert(descriptor.id(), descriptor);
    }

    /// Removes a descriptor if it is cached.
    pub fn remove(&self, kind: MentionKind, id: u64) {
        self.map_for(kind).remove(&id);
    }

    /// Looks up one descriptor.
    #[must_use]
    pub fn get(&self, kind: MentionKind, id: u64) -> Option<MentionDescriptor> {
        self.map_for(kind)
            .get(&id)
            .map(|entry| entry.value().clone())
    }

    /// Returns a point-in-time copy of every descriptor.
    #[must_use]
    pub fn descriptors(&self) -> Vec<MentionDescriptor> {
        self.users
            .iter()
            .chain(self.roles.iter())
            .chain(self.channels.iter())
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Returns whether a user descriptor has this literal form.
    #[must_use]
    pub fn has_user_text(&self, search_text: &str) -> bool {
        self.users
            .iter()
            .any(|entry| entry.value().search_text().eq_ignore_ascii_case(search_text))
    }

    /// Applies one change notification to this guild's descriptors.
    pub fn apply(&self, event: &MentionCacheEvent) {
        match event {
            MentionCacheEvent::MemberUpserted {
                user_id,
                display_name,
                ..
            } => self.upsert(MentionDescriptor::user(*user_id, display_name)),
            MentionCacheEvent::MemberRemoved { user_id, .. } => {
                self.remove(MentionKind::User, user_id.get());
            }
            MentionCacheEvent::RoleUpserted {
                role_id,
                name,
                mentionable,
                ..
            } => self.upsert(MentionDescriptor::role(*role_id, name, *mentionable)),
            MentionCacheEvent::RoleRemoved { role_id, .. } => {
                self.remove(MentionKind::Role, role_id.get());
            }
            MentionCacheEvent::ChannelUpserted {
                channel_id, name, ..
            } => self.upsert(MentionDescriptor::channel(*channel_id, name)),
            MentionCacheEvent::ChannelRemoved { channel_id, .. } => {
                self.remove(MentionKind::Channel, channel_id.get());
            }
            MentionCacheEvent::GuildRemoved { .. } => {}
        }
    }

    /// Returns the number of cached descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len() + self.roles.len() + self.channels.len()
    }

    /// Returns whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Change notifications received while one first snapshot is in flight.
#[derive(Debug, Default)]
struct JournalState {
    events: Vec<MentionCacheEvent>,
    closed: bool,
}

type BuildJournal = Arc<Mutex<JournalState>>;

fn lock(journal: &Mutex<JournalState>) -> MutexGuard<'_, JournalState> {
    journal.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Lazily built, incrementally updated mention cache for every guild.
///
/// Notifications arriving while a guild's first snapshot is in flight are
/// journaled and replayed onto the snapshot before it is cached.
pub struct MentionCache {
    directory: Arc<dyn GuildDirectory>,
    guilds: DashMap<GuildId, Arc<GuildMentions>>,
    building: DashMap<GuildId, Vec<BuildJournal>>,
}

impl MentionCache {
    /// Creates an empty cache backed by `directory`.
    #[must_use]
    pub fn new(directory: Arc<dyn GuildDirectory>) -> Self {
        Self {
            directory,
            guilds: DashMap::new(),
            building: DashMap::new(),
        }
    }

    /// Returns the cached mentions of a guild without touching the platform.
    #[must_use]
    pub fn cached(&self, guild_id: GuildId) -> Option<Arc<GuildMentions>> {
        self.guilds
            .get(&guild_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Returns the mentions of a guild, building them on first access.
    ///
    /// # Errors
    ///
    /// Returns [`MentionError::Directory`] when the first snapshot fails.
    pub async fn guild(&self, guild_id: GuildId) -> Result<Arc<GuildMentions>, MentionError> {
        if let Some(existing) = self.cached(guild_id) {
            return Ok(existing);
        }

        let journal = BuildJournal::default();
        self.building
            .entry(guild_id)
            .or_default()
            .push(Arc::clone(&journal));
        let snapshot = self.directory.snapshot(guild_id).await;
        let result = snapshot
            .map(|descriptors| self.install(guild_id, &journal, descriptors))
            .map_err(MentionError::from);
        self.deregister(guild_id, &journal);
        result
    }

    /// Replays the journal onto a fresh snapshot and caches it, unless the
    /// guild was removed while the snapshot was in flight.
    fn install(
        &self,
        guild_id: GuildId,
        journal: &BuildJournal,
        descriptors: Vec<MentionDescriptor>,
    ) -> Arc<GuildMentions> {
        let count = descriptors.len();
        let built = GuildMentions::from_descriptors(descriptors);
        let mut state = lock(journal);
        let replayed = state.events.len();
        let mut removed = false;
        for event in state.events.drain(..) {
            removed |= matches!(event, MentionCacheEvent::GuildRemoved { .. });
            built.apply(&event);
        }
        state.closed = true;

        let mentions = Arc::new(built);
        if removed {
            tracing::debug!(guild_id = %guild_id, "guild removed while building mention cache");
            return mentions;
        }
        tracing::debug!(guild_id = %guild_id, count, replayed, "built mention cache");
        let entry = self.guilds.entry(guild_id).or_insert(mentions);
        Arc::clone(entry.value())
    }

    fn deregister(&self, guild_id: GuildId, journal: &BuildJournal) {
        if let Some(mut journals) = self.building.get_mut(&guild_id) {
            journals.retain(|open| !Arc::ptr_eq(open, journal));
        }
        self.building
            .remove_if(&guild_id, |_, journals| journals.is_empty());
    }

    /// Records `event` in every open journal of its guild. Returns whether a
    /// snapshot was in flight.
    fn journal(&self, event: &MentionCacheEvent) -> bool {
        let journals = self
            .building
            .get(&event.guild_id())
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        let mut journaled = false;
        for open in journals {
            let mut state = lock(&open);
            if !state.closed {
                state.events.push(event.clone());
                journaled = true;
            }
        }
        journaled
    }

    /// Applies a platform change notification.
    ///
    /// Events for guilds that have never been requested are ignored; the lazy
    /// snapshot will observe the change.
    pub fn apply(&self, event: &MentionCacheEvent) {
        let guild_id = event.guild_id();
        let journaled = self.journal(event);
        if matches!(event, MentionCacheEvent::GuildRemoved { .. }) {
            self.guilds.remove(&guild_id);
            return;
        }

        let Some(mentions) = self.cached(guild_id) else {
            if !journaled {
                tracing::trace!(guild_id = %guild_id, "ignoring event for uncached guild");
            }
            return;
        };
        mentions.apply(event);
    }

    /// Looks up `@name` tokens in `text` that the cache cannot resolve and
    /// caches whatever the platform finds. Returns the number of
    /// descriptors added.
    ///
    /// # Errors
    ///
    /// Returns [`MentionError::Directory`] when a platform query fails.
    pub async fn resolve_uncached(
        &self,
        guild_id: GuildId,
        text: &str,
    ) -> Result<usize, MentionError> {
        let mentions = self.guild(guild_id).await?;
        let unresolved: BTreeSet<&str> = user_tokens(text)
            .into_iter()
            .filter(|token| !mentions.has_user_text(&format!("@{token}")))
            .collect();

        let mut added = 0;
        for token in unresolved {
            let found = self.directory.search_members(guild_id, token).await?;
            added += found.len();
            for descriptor in found {
                mentions.upsert(descriptor);
            }
        }
        Ok(added)
    }
}

/// Extracts the names following `@` at the start of a word.
fn user_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut previous = None;
    for (index, character) in text.char_indices() {
        let at_word_start = previous.is_none_or(char::is_whitespace);
        previous = Some(character);
        if character != '@' || !at_word_start {
            continue;
        }

        let start = index + character.len_utf8();
        let Some(rest) = text.get(start..) else {
            continue;
        };
        let end = rest
            .char_indices()
            .find(|(_, next)| !(next.is_alphanumeric() || *next == '_' || *next == '.'))
            .map_or(rest.len(), |(offset, _)| offset);
        if let Some(token) = rest.get(..end)
            && !token.is_empty()
        {
            tokens.push(token);
        }
    }
    tokens
}
