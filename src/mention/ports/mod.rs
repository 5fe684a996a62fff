//! Port contracts for platform lookups behind the mention cache.

mod directory;

pub use directory::{GuildDirectory, GuildDirectoryError, GuildDirectoryResult};
