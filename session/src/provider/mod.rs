//! Identity-provider adapter contract.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session core never talks to an authentication backend directly. It
//! depends on this trait; the browser build plugs in an HTTP adapter and
//! tests plug in [`memory::MemoryProvider`].
//!
//! An adapter must deliver change events in the order the backend produces
//! them and must be safe to call from a single cooperative thread: futures
//! are `?Send`, handlers are plain `Fn`.

pub mod memory;


use async_trait::async_trait;

use crate::error::ProviderError;
use crate::identity::Identity;
use crate::subscription::{ListenerSet, Subscription};

/// Callback invoked with the new identity (or `None` after sign-out).
pub type ChangeHandler = Box<dyn Fn(Option<&Identity>)>;

#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Run the provider's interactive sign-in flow.
    ///
    /// A successful flow also produces a change event; callers must not rely
    /// on which of the two is observed first.
    async fn sign_in_interactive(&self) -> Result<Identity, ProviderError>;

    /// End the provider session. Success is followed by an absent change event.
    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Attach `handler` to the change stream.
    ///
    /// # Errors
    ///
    /// Returns an error when the adapter cannot observe identity changes.
    fn on_change(&self, handler: ChangeHandler) -> Result<Subscription, ProviderError>;
}

/// Fan-out of identity-change events shared by adapter implementations.
#[derive(Clone, Default)]
pub struct ChangeStream {
    listeners: ListenerSet<Option<Identity>>,
}

impl ChangeStream {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(&self, handler: ChangeHandler) -> Subscription {
        self.listeners
            .add(move |identity: &Option<Identity>| handler(identity.as_ref()))
    }

    pub fn emit(&self, identity: Option<Identity>) {
        self.listeners.notify(&identity);
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
