//! Permission gate deciding which mentions a sender may render.

use crate::mention::domain::{MentionDescriptor, MentionKind, MentionPermission, MentionToggles};
use crate::platform::{RoleId, UserId};

/// Maps a sender's permissions and the channel's toggles to allow/deny
/// decisions for individual mentions.
///
/// `has_permission` answers for one sender in one guild.
pub struct MentionGate<F> {
    toggles: MentionToggles,
    has_permission: F,
}

impl<F> MentionGate<F>
where
    F: Fn(&MentionPermission) -> bool,
{
    /// Creates a gate for one sender in one guild.
    #[must_use]
    pub const fn new(toggles: MentionToggles, has_permission: F) -> Self {
        Self {
            toggles,
            has_permission,
        }
    }

    /// Returns the feature toggles in effect.
    #[must_use]
    pub const fn toggles(&self) -> &MentionToggles {
        &self.toggles
    }

    fn has(&self, permission: &MentionPermission) -> bool {
        (self.has_permission)(permission)
    }

    /// Returns whether `descriptor` may be rewritten into a live mention.
    #[must_use]
    pub fn allows(&self, descriptor: &MentionDescriptor) -> bool {
        match descriptor.kind() {
            MentionKind::User => {
                self.toggles.users
                    && (self.has(&MentionPermission::AllUsers)
                        || self.has(&MentionPermission::User(UserId::new(descriptor.id()))))
            }
            MentionKind::Role => {
                let role = RoleId::new(descriptor.id());
                self.toggles.roles
                    && (self.has(&MentionPermission::AllRoles)
                        || self.has(&MentionPermission::Role(role))
                        || (descriptor.is_publicly_mentionable()
                            && self.has(&MentionPermission::MentionableRoles)))
            }
            MentionKind::Channel => self.toggles.channels,
        }
    }

    /// Returns whether the sender may notify every user.
    #[must_use]
    pub fn allows_all_users(&self) -> bool {
        self.toggles.users && self.has(&MentionPermission::AllUsers)
    }

    /// Returns whether the sender may notify every role.
    #[must_use]
    pub fn allows_all_roles(&self) -> bool {
        self.toggles.roles && self.has(&MentionPermission::AllRoles)
    }

    /// Returns whether `@everyone`/`@here` may pass through.
    #[must_use]
    pub fn allows_everyone(&self) -> bool {
        self.toggles.everyone && self.has(&MentionPermission::Everyone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ChannelId;
    use rstest::rstest;

    fn gate_with(
        granted: Vec<MentionPermission>,
    ) -> MentionGate<impl Fn(&MentionPermission) -> bool> {
        MentionGate::new(MentionToggles::default(), move |permission: &MentionPermission| {
            granted.contains(permission)
        })
    }

    #[rstest]
    #[case(vec![], false)]
    #[case(vec![MentionPermission::AllUsers], true)]
    #[case(vec![MentionPermission::User(UserId::new(7))], true)]
    #[case(vec![MentionPermission::User(UserId::new(8))], false)]
    fn user_mentions(#[case] granted: Vec<MentionPermission>, #[case] expected: bool) {
        let gate = gate_with(granted);

        assert_eq!(
            gate.allows(&MentionDescriptor::user(UserId::new(7), "Alice")),
            expected
        );
    }

    #[rstest]
    #[case(true, vec![MentionPermission::MentionableRoles], true)]
    #[case(false, vec![MentionPermission::MentionableRoles], false)]
    #[case(false, vec![MentionPermission::AllRoles], true)]
    #[case(false, vec![MentionPermission::Role(RoleId::new(5))], true)]
    #[case(true, vec![], false)]
    fn role_mentions(
        #[case] mentionable: bool,
        #[case] granted: Vec<MentionPermission>,
        #[case] expected: bool,
    ) {
        let gate = gate_with(granted);

        assert_eq!(
            gate.allows(&MentionDescriptor::role(RoleId::new(5), "Staff", mentionable)),
            expected
        );
    }

    #[rstest]
    fn disabled_toggle_overrides_blanket_permission() {
        let toggles = MentionToggles {
            users: false,
            ..MentionToggles::default()
        };
        let gate = MentionGate::new(toggles, |_: &MentionPermission| true);

        assert!(!gate.allows(&MentionDescriptor::user(UserId::new(1), "Alice")));
        assert!(!gate.allows_all_users());
    }

    #[rstest]
    fn channel_mentions_follow_toggle_only() {
        let gate = gate_with(vec![]);

        assert!(gate.allows(&MentionDescriptor::channel(ChannelId::new(3), "general")));
    }

    #[rstest]
    #[case(false, true, false)]
    #[case(true, false, false)]
    #[case(true, true, true)]
    fn everyone_requires_toggle_and_permission(
        #[case] toggle: bool,
        #[case] permitted: bool,
        #[case] expected: bool,
    ) {
        let toggles = MentionToggles {
            everyone: toggle,
            ..MentionToggles::default()
        };
        let gate = MentionGate::new(toggles, move |permission: &MentionPermission| {
            permitted && *permission == MentionPermission::Everyone
        });

        assert_eq!(gate.allows_everyone(), expected);
    }
}
