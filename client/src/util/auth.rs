//! Shared auth redirect hooks.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical redirect behavior: nothing happens while
//! the session is resolving, and each rule fires once per transition into its
//! triggering condition.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use session::{RedirectRule, SessionState};

use crate::state::session::use_session;

/// Whether `destination` is a different route than `current`.
fn leaves_current(current: &str, destination: &str) -> bool {
    current.trim_end_matches('/') != destination.trim_end_matches('/')
}

/// Feed `state` to `rule`; the destination to navigate to, unless the visitor
/// is already there.
fn redirect_target(rule: &mut RedirectRule, state: &SessionState, current: &str) -> Option<String> {
    let target = rule.evaluate(state)?;
    leaves_current(current, target).then(|| target.to_owned())
}

/// Redirects replace the history entry so "back" does not bounce.
fn redirect_options() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..NavigateOptions::default()
    }
}

/// Send signed-in visitors to the configured authenticated destination.
pub fn use_redirect_if_authenticated() {
    let destination = use_session()
        .config
        .with_value(|cfg| cfg.authenticated_redirect.clone());
    use_redirect(RedirectRule::away_if_authenticated(destination));
}

/// Send signed-out visitors to the configured sign-in page.
pub fn use_redirect_if_unauthenticated() {
    let destination = use_session().config.with_value(|cfg| cfg.sign_in_redirect.clone());
    use_redirect(RedirectRule::away_if_unauthenticated(destination));
}

fn use_redirect(rule: RedirectRule) {
    let session = use_session();
    let navigate = use_navigate();
    let location = use_location();
    let rule = StoredValue::new(rule);

    Effect::new(move || {
        let state = session.state.get();
        let current = location.pathname.get_untracked();
        let target = rule
            .try_update_value(|rule| redirect_target(rule, &state, &current))
            .flatten();
        if let Some(target) = target {
            navigate(&target, redirect_options());
        }
    });
}
