use super::*;

#[test]
fn default_is_resolving_without_identity() {
    let state = SessionState::default();
    assert!(state.resolving);
    assert!(state.identity.is_none());
    assert!(!state.is_authenticated());
    assert!(!state.is_unauthenticated());
}

#[test]
fn apply_clears_resolving_and_sets_identity() {
    let mut state = SessionState::default();
    state.apply(Some(Identity::new("u1")));
    assert!(!state.resolving);
    assert!(state.is_authenticated());
}

#[test]
fn apply_absent_resolves_to_unauthenticated() {
    let mut state = SessionState::default();
    state.apply(None);
    assert!(!state.resolving);
    assert!(state.is_unauthenticated());
}

#[test]
fn resolving_never_returns_after_any_event_sequence() {
    let events = [
        Some(Identity::new("a")),
        None,
        None,
        Some(Identity::new("b")),
        Some(Identity::new("c")),
        None,
    ];
    let mut state = SessionState::default();
    for event in events {
        state.apply(event);
        assert!(!state.resolving);
    }
    assert!(state.identity.is_none());
}

#[test]
fn resolved_constructor_matches_applied_state() {
    let mut applied = SessionState::default();
    applied.apply(Some(Identity::new("u1")));
    assert_eq!(applied, SessionState::resolved(Some(Identity::new("u1"))));
}
