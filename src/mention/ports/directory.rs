//! Guild directory port used to build and extend the mention cache.

use crate::mention::domain::MentionDescriptor;
use crate::platform::GuildId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for guild directory operations.
pub type GuildDirectoryResult<T> = Result<T, GuildDirectoryError>;

/// Read access to a guild's members, roles, and channels.
#[async_trait]
pub trait GuildDirectory: Send + Sync {
    /// Returns descriptors for every cached member, role, and channel of the
    /// guild.
    async fn snapshot(&self, guild_id: GuildId) -> GuildDirectoryResult<Vec<MentionDescriptor>>;

    /// Searches the platform for members whose name matches `query`.
    ///
    /// This is a remote call and must stay off the default hot path.
    async fn search_members(
        &self,
        guild_id: GuildId,
        query: &str,
    ) -> GuildDirectoryResult<Vec<MentionDescriptor>>;
}

/// Errors returned by guild directory adapters.
#[derive(Debug, Clone, Error)]
pub enum GuildDirectoryError {
    /// The bot is not a member of the guild.
    #[error("guild {0} is not available")]
    UnknownGuild(GuildId),

    /// Platform request failure.
    #[error("guild directory error: {0}")]
    Platform(Arc<dyn std::error::Error + Send + Sync>),
}

impl GuildDirectoryError {
    /// Wraps a platform error from the directory adapter.
    pub fn platform(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Platform(Arc::new(err))
    }
}
