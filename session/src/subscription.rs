//! Listener registries and their disposers.
//!
//! DESIGN
//! ======
//! Every subscription in the session core hands back a [`Subscription`]
//! guard. Dropping the guard detaches the listener, so a component that
//! stores the guard in its own scope releases it on teardown without an
//! explicit call.
//!
//! Notification takes a snapshot of the registry and releases the borrow
//! before invoking listeners, so a listener may subscribe, unsubscribe or
//! read state re-entrantly. A listener removed mid-round is skipped.

#[cfg(test)]
#[path = "subscription_test.rs"]
mod subscription_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Guard returned by every `subscribe`/`listen` call; detaches on drop.
#[must_use = "dropping a Subscription detaches its listener immediately"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// Guard with nothing to release.
    pub fn detached() -> Self {
        Self { dispose: None }
    }

    /// Detach now instead of at end of scope.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.dispose.is_some())
            .finish()
    }
}

type Listener<E> = Rc<dyn Fn(&E)>;

struct Registry<E> {
    next_id: u64,
    entries: Vec<(u64, Listener<E>)>,
}

/// Ordered set of listeners for events of type `E`.
pub struct ListenerSet<E> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E> Clone for ListenerSet<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<E> Default for ListenerSet<E> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

impl<E: 'static> ListenerSet<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; it stays registered until the guard is dropped.
    pub fn add(&self, listener: impl Fn(&E) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, Rc::new(listener)));
            id
        };
        let registry = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().entries.retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Invoke every registered listener with `event`, in registration order.
    pub fn notify(&self, event: &E) {
        let snapshot: Vec<(u64, Listener<E>)> = self.registry.borrow().entries.clone();
        for (id, listener) in snapshot {
            if self.contains(id) {
                listener(event);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: u64) -> bool {
        self.registry.borrow().entries.iter().any(|(entry, _)| *entry == id)
    }
}
