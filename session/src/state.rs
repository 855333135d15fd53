//! Observable authentication state.
//!
//! DESIGN
//! ======
//! `SessionState` is the one mutable entity of the session core. Consumers
//! only ever see cloned snapshots; the store applies changes through
//! [`SessionState::apply`], which is crate-private so the single-writer rule
//! holds at the type level.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::identity::Identity;

/// Current identity plus the initial-resolution flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    /// True from mount until the first identity-change event; never again.
    pub resolving: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            identity: None,
            resolving: true,
        }
    }
}

impl SessionState {
    /// Resolved state holding `identity`.
    #[must_use]
    pub fn resolved(identity: Option<Identity>) -> Self {
        Self {
            identity,
            resolving: false,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.resolving && self.identity.is_some()
    }

    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        !self.resolving && self.identity.is_none()
    }

    /// Apply one identity-change event.
    pub(crate) fn apply(&mut self, identity: Option<Identity>) {
        self.resolving = false;
        self.identity = identity;
    }
}
