//! Single source of truth for authentication status.
//!
//! ARCHITECTURE
//! ============
//! `SessionStore` is a cheap `Clone` handle over shared single-threaded
//! state. Exactly one writer exists: the change handler that
//! [`SessionStore::initialize`] registers with the identity provider.
//! Everything else reads snapshots via [`SessionStore::get_state`] or
//! [`SessionStore::subscribe`].
//!
//! ORDERING
//! ========
//! Change events are applied strictly in arrival order. An event raised while
//! subscribers are still being notified (for example by a listener that signs
//! out) is queued and applied once the current round finishes, so every
//! subscriber sees states in the same monotonic sequence.
//!
//! ERROR HANDLING
//! ==============
//! `sign_in`/`sign_out` never touch state; only the change stream does. A
//! failed listener registration resolves the session to signed-out instead of
//! leaving it resolving forever.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::error::AuthError;
use crate::gate::GateDecision;
use crate::identity::Identity;
use crate::provider::IdentityProvider;
use crate::state::SessionState;
use crate::subscription::{ListenerSet, Subscription};

enum Lifecycle {
    Created,
    Attached(Subscription),
    /// Listener registration failed; the session is pinned to signed-out.
    Degraded,
    TornDown,
}

struct Shared {
    provider: Rc<dyn IdentityProvider>,
    state: RefCell<SessionState>,
    listeners: ListenerSet<SessionState>,
    lifecycle: RefCell<Lifecycle>,
    pending_events: RefCell<VecDeque<Option<Identity>>>,
    dispatching: Cell<bool>,
    sign_in_pending: Cell<bool>,
}

impl Shared {
    fn on_identity_changed(&self, identity: Option<Identity>) {
        if matches!(*self.lifecycle.borrow(), Lifecycle::TornDown) {
            return;
        }
        self.pending_events.borrow_mut().push_back(identity);
        if self.dispatching.replace(true) {
            return;
        }
        loop {
            let next = self.pending_events.borrow_mut().pop_front();
            let Some(identity) = next else {
                break;
            };
            let snapshot = {
                let mut state = self.state.borrow_mut();
                state.apply(identity);
                state.clone()
            };
            log::debug!(
                "session: identity changed to {}",
                snapshot.identity.as_ref().map_or("<none>", |i| i.id.as_str())
            );
            self.listeners.notify(&snapshot);
        }
        self.dispatching.set(false);
    }
}

/// Clears the pending sign-in flag when the sign-in future completes or is dropped.
struct PendingSignIn<'a>(&'a Cell<bool>);

impl Drop for PendingSignIn<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Observable session state bound to one identity provider.
#[derive(Clone)]
pub struct SessionStore {
    shared: Rc<Shared>,
}

impl SessionStore {
    /// Create a store in the resolving state. Call [`initialize`](Self::initialize)
    /// once to start listening.
    pub fn new(provider: Rc<dyn IdentityProvider>) -> Self {
        Self {
            shared: Rc::new(Shared {
                provider,
                state: RefCell::new(SessionState::default()),
                listeners: ListenerSet::new(),
                lifecycle: RefCell::new(Lifecycle::Created),
                pending_events: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
                sign_in_pending: Cell::new(false),
            }),
        }
    }

    /// Attach the change handler to the provider. Allowed once per store.
    ///
    /// # Errors
    ///
    /// [`AuthError::AlreadyInitialized`] on a repeated call.
    /// [`AuthError::Initialization`] if the provider refuses the listener; the
    /// state is then resolved to signed-out.
    pub fn initialize(&self) -> Result<(), AuthError> {
        if !matches!(*self.shared.lifecycle.borrow(), Lifecycle::Created) {
            return Err(AuthError::AlreadyInitialized);
        }

        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        let handler = Box::new(move |identity: Option<&Identity>| {
            if let Some(shared) = weak.upgrade() {
                shared.on_identity_changed(identity.cloned());
            }
        });

        match self.shared.provider.on_change(handler) {
            Ok(subscription) => {
                *self.shared.lifecycle.borrow_mut() = Lifecycle::Attached(subscription);
                log::debug!("session: change listener attached");
                Ok(())
            }
            Err(err) => {
                log::error!("session: failed to attach change listener: {err}");
                self.shared.on_identity_changed(None);
                *self.shared.lifecycle.borrow_mut() = Lifecycle::Degraded;
                Err(AuthError::Initialization(err.to_string()))
            }
        }
    }

    /// Detach from the provider. Later change events are ignored.
    pub fn teardown(&self) {
        let previous = self.shared.lifecycle.replace(Lifecycle::TornDown);
        if let Lifecycle::Attached(subscription) = previous {
            subscription.cancel();
            log::debug!("session: change listener detached");
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn get_state(&self) -> SessionState {
        self.shared.state.borrow().clone()
    }

    #[must_use]
    pub fn decision(&self) -> GateDecision {
        GateDecision::from_state(&self.shared.state.borrow())
    }

    /// Register `listener` for every applied change.
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + 'static) -> Subscription {
        self.shared.listeners.add(listener)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.listeners.len()
    }

    #[must_use]
    pub fn is_sign_in_pending(&self) -> bool {
        self.shared.sign_in_pending.get()
    }

    /// Start the provider's interactive sign-in.
    ///
    /// State changes arrive through the change stream; the returned identity
    /// is informational only.
    ///
    /// # Errors
    ///
    /// [`AuthError::SignInInProgress`] if another sign-in is still pending,
    /// otherwise the classified provider failure.
    pub async fn sign_in(&self) -> Result<Identity, AuthError> {
        if self.shared.sign_in_pending.replace(true) {
            log::debug!("session: ignoring duplicate sign-in request");
            return Err(AuthError::SignInInProgress);
        }
        let _pending = PendingSignIn(&self.shared.sign_in_pending);
        let provider = Rc::clone(&self.shared.provider);

        match provider.sign_in_interactive().await {
            Ok(identity) => {
                log::info!("session: signed in as {}", identity.id);
                Ok(identity)
            }
            Err(err) => {
                let err = AuthError::from_sign_in(err);
                if matches!(err, AuthError::SignInCancelled) {
                    log::debug!("session: {err}");
                } else {
                    log::warn!("session: {err}");
                }
                Err(err)
            }
        }
    }

    /// End the provider session. The UI flips to signed-out only once the
    /// provider confirms through the change stream.
    ///
    /// # Errors
    ///
    /// [`AuthError::SignOutFailed`] when the provider rejects the request.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let provider = Rc::clone(&self.shared.provider);
        match provider.sign_out().await {
            Ok(()) => {
                log::info!("session: signed out");
                Ok(())
            }
            Err(err) => {
                let err = AuthError::from_sign_out(err);
                log::warn!("session: {err}");
                Err(err)
            }
        }
    }
}
