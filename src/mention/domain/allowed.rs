//! Allowed-mention declarations and everyone-mention neutralization.

use super::{MentionDescriptor, MentionError, MentionKind};
use crate::platform::{RoleId, UserId};
use std::collections::BTreeSet;

/// Zero-width separator inserted after `@` to defuse mass mentions.
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

const MASS_MENTIONS: [&str; 2] = ["@everyone", "@here"];

/// Which mentions an outgoing message may actually notify.
///
/// Built fresh for every forward from sender permissions and config toggles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowedMentionSet {
    everyone: bool,
    all_users: bool,
    all_roles: bool,
    users: BTreeSet<UserId>,
    roles: BTreeSet<RoleId>,
}

impl AllowedMentionSet {
    /// A declaration that notifies nobody.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds the declaration for a rewritten message.
    ///
    /// `rewritten` lists the descriptors the gate allowed and that were
    /// rendered. Blanket flags reflect blanket sender permissions.
    #[must_use]
    pub fn from_rewrite(
        rewritten: &[MentionDescriptor],
        all_users: bool,
        all_roles: bool,
        everyone: bool,
    ) -> Self {
        let users = rewritten
            .iter()
            .filter(|descriptor| descriptor.kind() == MentionKind::User)
            .map(|descriptor| UserId::new(descriptor.id()))
            .collect();
        let roles = rewritten
            .iter()
            .filter(|descriptor| descriptor.kind() == MentionKind::Role)
            .map(|descriptor| RoleId::new(descriptor.id()))
            .collect();
        Self {
            everyone,
            all_users,
            all_roles,
            users,
            roles,
        }
    }

    /// Returns whether `@everyone`/`@here` may notify.
    #[must_use]
    pub const fn everyone(&self) -> bool {
        self.everyone
    }

    /// Returns whether every user mention may notify.
    #[must_use]
    pub const fn all_users(&self) -> bool {
        self.all_users
    }

    /// Returns whether every role mention may notify.
    #[must_use]
    pub const fn all_roles(&self) -> bool {
        self.all_roles
    }

    /// Returns whether a mention of `user` may notify.
    #[must_use]
    pub fn allows_user(&self, user: UserId) -> bool {
        self.all_users || self.users.contains(&user)
    }

    /// Returns whether a mention of `role` may notify.
    #[must_use]
    pub fn allows_role(&self, role: RoleId) -> bool {
        self.all_roles || self.roles.contains(&role)
    }

    /// Returns the explicitly allowed users.
    #[must_use]
    pub const fn users(&self) -> &BTreeSet<UserId> {
        &self.users
    }

    /// Returns the explicitly allowed roles.
    #[must_use]
    pub const fn roles(&self) -> &BTreeSet<RoleId> {
        &self.roles
    }
}

/// Defuses literal `@everyone` and `@here` by inserting a zero-width space
/// after the `@`.
///
/// Text already free of the triggers is returned unchanged, so the step is
/// idempotent.
///
/// # Errors
///
/// Returns [`MentionError::NeutralizationFailed`] if a trigger literal
/// survives, which indicates a bug in this function.
pub fn neutralize_everyone(text: &str) -> Result<String, MentionError> {
    let mut output = text.to_owned();
    for trigger in MASS_MENTIONS {
        if output.contains(trigger) {
            let defused = trigger.replacen('@', &format!("@{ZERO_WIDTH_SPACE}"), 1);
            output = output.replace(trigger, &defused);
        }
    }

    if MASS_MENTIONS.iter().any(|trigger| output.contains(trigger)) {
        return Err(MentionError::NeutralizationFailed(output));
    }
    Ok(output)
}
