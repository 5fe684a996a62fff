//! Snowflake identifiers for platform entities.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw snowflake value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw snowflake value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

snowflake_id!(
    /// Identifier of a guild (a community server on the messaging platform).
    GuildId
);
snowflake_id!(
    /// Identifier of a guild channel or thread.
    ChannelId
);
snowflake_id!(
    /// Identifier of a platform user.
    UserId
);
snowflake_id!(
    /// Identifier of a guild role.
    RoleId
);
snowflake_id!(
    /// Identifier of a delivered message.
    MessageId
);
