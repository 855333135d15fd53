//! Browser-local session core for the portfolio dashboard.
//!
//! This crate is UI-framework agnostic: it owns the authentication state
//! machine, the access-gate decision, redirect rules, and the identity-menu
//! model. The `client` crate binds these to Leptos components.
//!
//! ARCHITECTURE
//! ============
//! An [`IdentityProvider`](provider::IdentityProvider) emits identity changes,
//! the [`SessionStore`](store::SessionStore) applies them as the single
//! writer, and every other component reads snapshots through subscriptions.

pub mod config;
pub mod error;
pub mod gate;
pub mod identity;
pub mod menu;
pub mod provider;
pub mod redirect;
pub mod state;
pub mod store;
pub mod subscription;

pub use config::{ConfigError, ProviderKind, SessionConfig};
pub use error::{AuthError, ProviderError};
pub use gate::{AccessGate, GateDecision};
pub use identity::Identity;
pub use menu::{IdentityMenu, IdentitySummary, MenuView};
pub use provider::{ChangeHandler, ChangeStream, IdentityProvider};
pub use redirect::{RedirectPolicy, RedirectRule, install_redirect};
pub use state::SessionState;
pub use store::SessionStore;
pub use subscription::{ListenerSet, Subscription};
