//! Access-gate decision for protected views.
//!
//! DESIGN
//! ======
//! The decision is a pure function of [`SessionState`]. [`AccessGate`] keeps
//! the latest decision for one mounted protected view and reports only real
//! changes, so wrapped content is not rebuilt on every unrelated notification.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::identity::Identity;
use crate::state::SessionState;
use crate::store::SessionStore;
use crate::subscription::Subscription;

/// Three-way render outcome for a protected view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Initial resolution still running; show a neutral loading indicator.
    Resolving,
    /// No identity; show the sign-in entry point, never protected content.
    Denied,
    /// Render the protected content.
    Granted(Identity),
}

impl GateDecision {
    #[must_use]
    pub fn from_state(state: &SessionState) -> Self {
        if state.resolving {
            return Self::Resolving;
        }
        match &state.identity {
            None => Self::Denied,
            Some(identity) => Self::Granted(identity.clone()),
        }
    }

    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Granted(identity) => Some(identity),
            Self::Resolving | Self::Denied => None,
        }
    }
}

impl From<&SessionState> for GateDecision {
    fn from(state: &SessionState) -> Self {
        Self::from_state(state)
    }
}

/// Live gate for one protected view; unsubscribes when dropped.
pub struct AccessGate {
    decision: Rc<RefCell<GateDecision>>,
    _subscription: Subscription,
}

impl AccessGate {
    /// Subscribe to `store`, calling `on_change` whenever the decision differs
    /// from the previous one.
    pub fn mount(store: &SessionStore, on_change: impl Fn(&GateDecision) + 'static) -> Self {
        let decision = Rc::new(RefCell::new(store.decision()));
        let slot = Rc::clone(&decision);
        let subscription = store.subscribe(move |state| {
            let next = GateDecision::from_state(state);
            let changed = {
                let mut current = slot.borrow_mut();
                if *current == next {
                    false
                } else {
                    current.clone_from(&next);
                    true
                }
            };
            if changed {
                on_change(&next);
            }
        });
        Self {
            decision,
            _subscription: subscription,
        }
    }

    #[must_use]
    pub fn decision(&self) -> GateDecision {
        self.decision.borrow().clone()
    }
}
