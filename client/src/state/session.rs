//! Session context for the component tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionContext::new` builds the identity provider named by config, wires a
//! `SessionStore` to it and mirrors every applied change into a signal so
//! views re-render. The store and its subscriptions are single-threaded and
//! live in local arena storage owned by the root component; they are dropped
//! with it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::rc::Rc;

use leptos::prelude::*;
use session::config::{
    KEY_AUTH_BASE_URL, KEY_AUTHENTICATED_REDIRECT, KEY_POPUP_POLL_MS, KEY_PROVIDER, KEY_SIGN_IN_PATH,
    KEY_SIGN_IN_REDIRECT,
};
use session::provider::memory::MemoryProvider;
use session::{Identity, IdentityMenu, ProviderKind, SessionConfig, SessionState, SessionStore, Subscription};

use crate::net::identity_provider::HttpIdentityProvider;

/// Handles to the session store and the signals derived from it.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub store: StoredValue<SessionStore, LocalStorage>,
    /// Read-only mirror of the store state; the store subscription in
    /// `attach` is its only writer.
    pub state: ReadSignal<SessionState>,
    pub menu: RwSignal<IdentityMenu>,
    pub config: StoredValue<SessionConfig>,
    mirror: StoredValue<Option<Subscription>, LocalStorage>,
}

impl SessionContext {
    /// Build the provider, attach the store and kick off initial resolution.
    pub fn new(config: SessionConfig) -> Self {
        let menu = RwSignal::new(IdentityMenu::default());

        let (store, state, mirror) = match config.provider {
            ProviderKind::Memory => {
                let provider = Rc::new(MemoryProvider::new().with_default_identity(demo_identity()));
                let store = SessionStore::new(provider.clone());
                let (state, mirror) = attach(&store, menu);
                provider.resolve_initial();
                (store, state, mirror)
            }
            ProviderKind::Http => {
                let provider = Rc::new(HttpIdentityProvider::new(config.clone()));
                let store = SessionStore::new(provider.clone());
                let (state, mirror) = attach(&store, menu);
                leptos::task::spawn_local(async move { provider.resolve_initial().await });
                (store, state, mirror)
            }
        };

        Self {
            store: StoredValue::new_local(store),
            state,
            menu,
            config: StoredValue::new(config),
            mirror: StoredValue::new_local(mirror),
        }
    }

    /// Start interactive sign-in unless one is already pending.
    pub fn sign_in(self) {
        if !self.menu.try_update(IdentityMenu::begin_sign_in).unwrap_or(false) {
            return;
        }
        let store = self.store.get_value();
        let menu = self.menu;
        leptos::task::spawn_local(async move {
            let result = store.sign_in().await;
            menu.update(|m| m.finish_sign_in(&result));
        });
    }

    pub fn sign_out(self) {
        if !self.menu.try_update(IdentityMenu::begin_sign_out).unwrap_or(false) {
            return;
        }
        let store = self.store.get_value();
        let menu = self.menu;
        leptos::task::spawn_local(async move {
            let result = store.sign_out().await;
            menu.update(|m| m.finish_sign_out(&result));
        });
    }

    /// Detach from the provider; later identity changes are ignored.
    /// Safe to call after the owning scope has been disposed.
    pub fn teardown(self) {
        if let Some(Some(mirror)) = self.mirror.try_update_value(Option::take) {
            mirror.cancel();
        }
        self.store.try_with_value(SessionStore::teardown);
    }
}

/// Session context installed by [`crate::app::App`].
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

/// Mirror the store into a fresh signal, then start listening to the provider.
fn attach(store: &SessionStore, menu: RwSignal<IdentityMenu>) -> (ReadSignal<SessionState>, Option<Subscription>) {
    let (state, set_state) = signal(store.get_state());
    let mirror = store.subscribe(move |next| {
        set_state.set(next.clone());
        menu.update(|m| m.observe(next));
    });
    if let Err(err) = store.initialize() {
        leptos::logging::warn!("session listener unavailable: {err}");
    }
    (state, Some(mirror))
}

/// Config baked in at build time through `SESSION_*` variables.
pub fn load_config() -> SessionConfig {
    SessionConfig::from_lookup(compile_time_value).unwrap_or_else(|err| {
        leptos::logging::warn!("invalid session config, using defaults: {err}");
        SessionConfig::default()
    })
}

fn compile_time_value(key: &str) -> Option<String> {
    let value = match key {
        KEY_PROVIDER => option_env!("SESSION_PROVIDER"),
        KEY_AUTH_BASE_URL => option_env!("SESSION_AUTH_BASE_URL"),
        KEY_SIGN_IN_PATH => option_env!("SESSION_SIGN_IN_PATH"),
        KEY_AUTHENTICATED_REDIRECT => option_env!("SESSION_AUTHENTICATED_REDIRECT"),
        KEY_SIGN_IN_REDIRECT => option_env!("SESSION_SIGN_IN_REDIRECT"),
        KEY_POPUP_POLL_MS => option_env!("SESSION_POPUP_POLL_MS"),
        _ => None,
    };
    value.map(str::to_owned)
}

/// Identity granted by the in-memory provider.
fn demo_identity() -> Identity {
    Identity::new("demo-investor")
        .with_display_name("Demo Investor")
        .with_email("demo@portfolio.local")
}
