//! In-memory guild directory for tests and deterministic embedding.

use crate::mention::{
    domain::{MentionDescriptor, MentionKind},
    ports::{GuildDirectory, GuildDirectoryError, GuildDirectoryResult},
};
use crate::platform::GuildId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory guild directory.
///
/// Members added with [`InMemoryGuildDirectory::add_remote_member`] are left
/// out of snapshots and only found through
/// [`GuildDirectory::search_members`], modelling members outside the
/// platform's member chunking window.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGuildDirectory {
    state: Arc<RwLock<DirectoryState>>,
    snapshot_calls: Arc<AtomicUsize>,
    search_calls: Arc<AtomicUsize>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    cached: HashMap<GuildId, Vec<MentionDescriptor>>,
    remote: HashMap<GuildId, Vec<MentionDescriptor>>,
}

impl InMemoryGuildDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor visible in guild snapshots.
    ///
    /// # Errors
    ///
    /// Returns a platform error when lock acquisition fails.
    pub fn add(&self, guild_id: GuildId, descriptor: MentionDescriptor) -> GuildDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            GuildDirectoryError::platform(std::io::Error::other(err.to_string()))
        })?;
        state.cached.entry(guild_id).or_default().push(descriptor);
        Ok(())
    }

    /// Adds a member only reachable through a remote search.
    ///
    /// # Errors
    ///
    /// Returns a platform error when lock acquisition fails.
    pub fn add_remote_member(
        &self,
        guild_id: GuildId,
        descriptor: MentionDescriptor,
    ) -> GuildDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            GuildDirectoryError::platform(std::io::Error::other(err.to_string()))
        })?;
        state.remote.entry(guild_id).or_default().push(descriptor);
        Ok(())
    }

    /// Returns how many snapshots were requested.
    #[must_use]
    pub fn snapshot_calls(&self) -> usize {
        self.snapshot_calls.load(Ordering::SeqCst)
    }

    /// Returns how many remote searches were requested.
    #[must_use]
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GuildDirectory for InMemoryGuildDirectory {
    async fn snapshot(&self, guild_id: GuildId) -> GuildDirectoryResult<Vec<MentionDescriptor>> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.read().map_err(|err| {
            GuildDirectoryError::platform(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.cached.get(&guild_id).cloned().unwrap_or_default())
    }

    async fn search_members(
        &self,
        guild_id: GuildId,
        query: &str,
    ) -> GuildDirectoryResult<Vec<MentionDescriptor>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.read().map_err(|err| {
            GuildDirectoryError::platform(std::io::Error::other(err.to_string()))
        })?;
        let needle = format!("@{query}");
        let matches = state
            .cached
            .get(&guild_id)
            .into_iter()
            .chain(state.remote.get(&guild_id))
            .flatten()
            .filter(|descriptor| descriptor.kind() == MentionKind::User)
            .filter(|descriptor| descriptor.search_text().eq_ignore_ascii_case(&needle))
            .cloned()
            .collect();
        Ok(matches)
    }
}
