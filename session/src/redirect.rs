//! Redirect-on-auth-change rules.
//!
//! A rule fires on the transition into its triggering condition, not on
//! mere presence: once it has navigated it stays quiet until the condition
//! stops holding and then holds again. Nothing fires while resolving.

#[cfg(test)]
#[path = "redirect_test.rs"]
mod redirect_test;

use std::cell::RefCell;

use crate::state::SessionState;
use crate::store::SessionStore;
use crate::subscription::Subscription;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectPolicy {
    /// Leave the current view once signed in (e.g. the sign-in page).
    AwayIfAuthenticated,
    /// Leave the current view once known to be signed out.
    AwayIfUnauthenticated,
}

impl RedirectPolicy {
    fn triggered_by(self, state: &SessionState) -> bool {
        match self {
            Self::AwayIfAuthenticated => state.is_authenticated(),
            Self::AwayIfUnauthenticated => state.is_unauthenticated(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectRule {
    policy: RedirectPolicy,
    destination: String,
    armed: bool,
}

impl RedirectRule {
    pub fn new(policy: RedirectPolicy, destination: impl Into<String>) -> Self {
        Self {
            policy,
            destination: destination.into(),
            armed: true,
        }
    }

    pub fn away_if_authenticated(destination: impl Into<String>) -> Self {
        Self::new(RedirectPolicy::AwayIfAuthenticated, destination)
    }

    pub fn away_if_unauthenticated(destination: impl Into<String>) -> Self {
        Self::new(RedirectPolicy::AwayIfUnauthenticated, destination)
    }

    #[must_use]
    pub fn policy(&self) -> RedirectPolicy {
        self.policy
    }

    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Feed one state; returns the destination when navigation should happen.
    pub fn evaluate(&mut self, state: &SessionState) -> Option<&str> {
        if state.resolving {
            return None;
        }
        if !self.policy.triggered_by(state) {
            self.armed = true;
            return None;
        }
        if !self.armed {
            return None;
        }
        self.armed = false;
        Some(&self.destination)
    }
}

/// Evaluate `rule` against the current state and every later change,
/// calling `navigate` when it fires. Detaches when the guard drops.
pub fn install_redirect<F>(store: &SessionStore, rule: RedirectRule, navigate: F) -> Subscription
where
    F: Fn(&str) + 'static,
{
    let rule = RefCell::new(rule);
    let fire = move |state: &SessionState| {
        let target = rule.borrow_mut().evaluate(state).map(str::to_owned);
        if let Some(target) = target {
            log::debug!("session: redirecting to {target}");
            navigate(&target);
        }
    };
    fire(&store.get_state());
    store.subscribe(fire)
}
