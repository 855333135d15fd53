//! In-memory identity provider.
//!
//! Scriptable stand-in for a real authentication backend: tests queue
//! sign-in outcomes and push synthetic change events, and the `memory`
//! provider mode uses it to sign in a fixed demo identity without a backend.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;
use futures::channel::oneshot;

use super::{ChangeHandler, ChangeStream, IdentityProvider};
use crate::error::ProviderError;
use crate::identity::Identity;
use crate::subscription::Subscription;

/// Result of the next interactive sign-in.
#[derive(Debug)]
pub enum SignInOutcome {
    Succeed(Identity),
    Fail(ProviderError),
    /// Stay pending until the paired sender resolves; a dropped sender
    /// counts as the user dismissing the flow.
    Wait(oneshot::Receiver<Result<Identity, ProviderError>>),
}

#[derive(Default)]
pub struct MemoryProvider {
    stream: ChangeStream,
    current: RefCell<Option<Identity>>,
    default_identity: Option<Identity>,
    sign_in_script: RefCell<VecDeque<SignInOutcome>>,
    sign_out_failures: RefCell<VecDeque<ProviderError>>,
    refuse_listeners: Cell<bool>,
    sign_in_calls: Cell<usize>,
}

impl MemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity granted by sign-in when no outcome is queued.
    #[must_use]
    pub fn with_default_identity(mut self, identity: Identity) -> Self {
        self.default_identity = Some(identity);
        self
    }

    /// Identity the provider "remembers" from an earlier visit; reported by
    /// [`resolve_initial`](Self::resolve_initial).
    #[must_use]
    pub fn with_persisted_identity(self, identity: Identity) -> Self {
        *self.current.borrow_mut() = Some(identity);
        self
    }

    /// Deliver the first change event carrying the remembered identity.
    pub fn resolve_initial(&self) {
        let current = self.current.borrow().clone();
        self.stream.emit(current);
    }

    /// Push a synthetic change event.
    pub fn emit(&self, identity: Option<Identity>) {
        self.current.borrow_mut().clone_from(&identity);
        self.stream.emit(identity);
    }

    pub fn queue_sign_in(&self, outcome: SignInOutcome) {
        self.sign_in_script.borrow_mut().push_back(outcome);
    }

    pub fn fail_next_sign_out(&self, err: ProviderError) {
        self.sign_out_failures.borrow_mut().push_back(err);
    }

    /// Make subsequent `on_change` registrations fail.
    pub fn refuse_listeners(&self) {
        self.refuse_listeners.set(true);
    }

    #[must_use]
    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.get()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.stream.listener_count()
    }

    fn next_sign_in(&self) -> SignInOutcome {
        let queued = self.sign_in_script.borrow_mut().pop_front();
        queued.unwrap_or_else(|| match &self.default_identity {
            Some(identity) => SignInOutcome::Succeed(identity.clone()),
            None => SignInOutcome::Fail(ProviderError::Failed("no identity configured".to_owned())),
        })
    }
}

#[async_trait(?Send)]
impl IdentityProvider for MemoryProvider {
    async fn sign_in_interactive(&self) -> Result<Identity, ProviderError> {
        self.sign_in_calls.set(self.sign_in_calls.get() + 1);
        let result = match self.next_sign_in() {
            SignInOutcome::Succeed(identity) => Ok(identity),
            SignInOutcome::Fail(err) => Err(err),
            SignInOutcome::Wait(rx) => rx.await.unwrap_or(Err(ProviderError::Cancelled)),
        };
        if let Ok(identity) = &result {
            self.emit(Some(identity.clone()));
        }
        result
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let failure = self.sign_out_failures.borrow_mut().pop_front();
        if let Some(err) = failure {
            return Err(err);
        }
        self.emit(None);
        Ok(())
    }

    fn on_change(&self, handler: ChangeHandler) -> Result<Subscription, ProviderError> {
        if self.refuse_listeners.get() {
            return Err(ProviderError::Unavailable("listener registration refused".to_owned()));
        }
        Ok(self.stream.listen(handler))
    }
}
