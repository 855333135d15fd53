use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;

use super::*;
use crate::error::ProviderError;
use crate::provider::memory::{MemoryProvider, SignInOutcome};
use crate::store::SessionStore;

fn ann() -> Identity {
    Identity::new("u1")
        .with_display_name("Ann")
        .with_email("ann@example.com")
}

// =============================================================
// IdentitySummary
// =============================================================

#[test]
fn summary_uses_avatar_url_when_present() {
    let identity = ann().with_avatar_url("https://img.test/ann.png");
    let summary = IdentitySummary::from_identity(&identity);
    assert_eq!(summary.label, "Ann");
    assert_eq!(summary.email.as_deref(), Some("ann@example.com"));
    assert_eq!(summary.avatar_src, "https://img.test/ann.png");
}

#[test]
fn summary_falls_back_to_generated_avatar() {
    let summary = IdentitySummary::from_identity(&Identity::new("u9").with_display_name("Ann Lee"));
    assert_eq!(
        summary.avatar_src,
        "https://ui-avatars.com/api/?name=Ann%20Lee&background=3b82f6&color=fff"
    );
}

#[test]
fn summary_without_name_uses_user_label() {
    let summary = IdentitySummary::from_identity(&Identity::new("u9"));
    assert_eq!(summary.label, "User");
    assert!(summary.avatar_src.contains("name=User"));
}

// =============================================================
// view
// =============================================================

#[test]
fn view_is_loading_while_resolving() {
    let menu = IdentityMenu::default();
    assert_eq!(menu.view(&SessionState::default()), MenuView::Loading);
}

#[test]
fn view_offers_get_started_when_denied() {
    let menu = IdentityMenu::default();
    assert_eq!(
        menu.view(&SessionState::resolved(None)),
        MenuView::GetStarted { pending: false }
    );
}

#[test]
fn view_shows_account_when_granted() {
    let mut menu = IdentityMenu::default();
    menu.toggle();
    match menu.view(&SessionState::resolved(Some(ann()))) {
        MenuView::Account { summary, open, signing_out } => {
            assert_eq!(summary.id, "u1");
            assert!(open);
            assert!(!signing_out);
        }
        other => panic!("unexpected view: {other:?}"),
    }
}

// =============================================================
// sign-in / sign-out bookkeeping
// =============================================================

#[test]
fn second_begin_sign_in_is_refused() {
    let mut menu = IdentityMenu::default();
    assert!(menu.begin_sign_in());
    assert!(!menu.begin_sign_in());
    assert!(menu.sign_in_pending());
    assert!(!menu.sign_out_pending());
    assert_eq!(
        menu.view(&SessionState::resolved(None)),
        MenuView::GetStarted { pending: true }
    );
}

#[test]
fn cancelled_sign_in_restores_prior_ui_without_notice() {
    let mut menu = IdentityMenu::default();
    let before = menu.clone();
    menu.begin_sign_in();
    menu.finish_sign_in(&Err(AuthError::SignInCancelled));
    assert_eq!(menu, before);
}

#[test]
fn failed_sign_in_sets_dismissible_notice_and_allows_retry() {
    let mut menu = IdentityMenu::default();
    menu.begin_sign_in();
    menu.finish_sign_in(&Err(AuthError::SignInFailed("offline".into())));
    assert!(menu.notice().is_some());
    assert!(menu.begin_sign_in());
    assert!(menu.notice().is_none());
    menu.finish_sign_in(&Ok(ann()));
    menu.dismiss_notice();
    assert!(menu.notice().is_none());
}

#[test]
fn failed_sign_out_keeps_menu_open_with_notice() {
    let mut menu = IdentityMenu::default();
    menu.open();
    assert!(menu.begin_sign_out());
    menu.finish_sign_out(&Err(AuthError::SignOutFailed("503".into())));
    assert!(menu.is_open());
    assert!(menu.notice().is_some());
}

#[test]
fn observe_closes_menu_once_signed_out() {
    let mut menu = IdentityMenu::default();
    menu.open();
    menu.observe(&SessionState::resolved(Some(ann())));
    assert!(menu.is_open());
    menu.observe(&SessionState::resolved(None));
    assert!(!menu.is_open());
}

// =============================================================
// Scenarios against a live store
// =============================================================

#[test]
fn sign_out_scenario_ends_denied_with_menu_closed() {
    let provider = Rc::new(MemoryProvider::new());
    let store = SessionStore::new(provider.clone());
    store.initialize().unwrap();
    provider.emit(Some(ann()));

    let menu = Rc::new(RefCell::new(IdentityMenu::default()));
    let observer = Rc::clone(&menu);
    let _guard = store.subscribe(move |state| observer.borrow_mut().observe(state));
    menu.borrow_mut().open();

    assert!(menu.borrow_mut().begin_sign_out());
    let result = block_on(store.sign_out());
    menu.borrow_mut().finish_sign_out(&result);

    assert_eq!(store.decision(), crate::gate::GateDecision::Denied);
    assert!(!menu.borrow().is_open());
    assert_eq!(
        menu.borrow().view(&store.get_state()),
        MenuView::GetStarted { pending: false }
    );
}

#[test]
fn rejected_sign_in_scenario_leaves_menu_actionable() {
    let provider = Rc::new(MemoryProvider::new());
    let store = SessionStore::new(provider.clone());
    store.initialize().unwrap();
    provider.emit(None);
    provider.queue_sign_in(SignInOutcome::Fail(ProviderError::Failed("network".into())));

    let mut menu = IdentityMenu::default();
    assert!(menu.begin_sign_in());
    let result = block_on(store.sign_in());
    menu.finish_sign_in(&result);

    assert_eq!(
        menu.view(&store.get_state()),
        MenuView::GetStarted { pending: false }
    );
    assert_eq!(menu.notice(), Some("Sign in failed. Please try again."));
}
