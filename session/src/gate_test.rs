use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::provider::memory::MemoryProvider;

fn ann() -> Identity {
    Identity::new("u1").with_display_name("Ann")
}

fn store_with(provider: &Rc<MemoryProvider>) -> SessionStore {
    let store = SessionStore::new(provider.clone());
    store.initialize().unwrap();
    store
}

// =============================================================
// from_state
// =============================================================

#[test]
fn resolving_state_is_resolving_even_with_identity() {
    let state = SessionState {
        identity: Some(ann()),
        resolving: true,
    };
    assert_eq!(GateDecision::from_state(&state), GateDecision::Resolving);
}

#[test]
fn resolved_without_identity_is_denied() {
    let state = SessionState::resolved(None);
    assert_eq!(GateDecision::from(&state), GateDecision::Denied);
}

#[test]
fn resolved_with_identity_is_granted() {
    let decision = GateDecision::from_state(&SessionState::resolved(Some(ann())));
    assert!(decision.is_granted());
    assert_eq!(decision.identity().map(|i| i.id.as_str()), Some("u1"));
}

#[test]
fn only_granted_exposes_identity() {
    assert!(GateDecision::Resolving.identity().is_none());
    assert!(GateDecision::Denied.identity().is_none());
}

// =============================================================
// AccessGate
// =============================================================

#[test]
fn gate_starts_resolving_before_first_event() {
    let provider = Rc::new(MemoryProvider::new());
    let store = store_with(&provider);
    let gate = AccessGate::mount(&store, |_| {});
    assert_eq!(gate.decision(), GateDecision::Resolving);
}

#[test]
fn gate_reports_only_decision_changes() {
    let provider = Rc::new(MemoryProvider::new());
    let store = store_with(&provider);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let gate = AccessGate::mount(&store, move |d| sink.borrow_mut().push(d.clone()));

    provider.emit(Some(ann()));
    provider.emit(Some(ann()));
    provider.emit(None);
    provider.emit(None);

    assert_eq!(
        *seen.borrow(),
        vec![GateDecision::Granted(ann()), GateDecision::Denied]
    );
    assert_eq!(gate.decision(), GateDecision::Denied);
}

#[test]
fn gate_never_grants_while_resolving() {
    let provider = Rc::new(MemoryProvider::new());
    let store = store_with(&provider);
    let violations = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&violations);
    let probe = store.clone();
    let _gate = AccessGate::mount(&store, move |d| {
        if d.is_granted() && probe.get_state().resolving {
            *counter.borrow_mut() += 1;
        }
    });

    provider.emit(Some(ann()));
    provider.emit(None);
    provider.emit(Some(Identity::new("u2")));

    assert_eq!(*violations.borrow(), 0);
}

#[test]
fn dropping_gate_unsubscribes() {
    let provider = Rc::new(MemoryProvider::new());
    let store = store_with(&provider);
    let gate = AccessGate::mount(&store, |_| {});
    assert_eq!(store.subscriber_count(), 1);
    drop(gate);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn gate_mounted_after_resolution_starts_with_current_decision() {
    let provider = Rc::new(MemoryProvider::new());
    let store = store_with(&provider);
    provider.emit(Some(ann()));
    let gate = AccessGate::mount(&store, |_| {});
    assert_eq!(gate.decision(), GateDecision::Granted(ann()));
}
