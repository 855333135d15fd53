use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;

use super::*;

fn recorder(provider: &MemoryProvider) -> (Rc<RefCell<Vec<Option<String>>>>, Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let guard = provider
        .on_change(Box::new(move |identity| {
            sink.borrow_mut().push(identity.map(|i| i.id.clone()));
        }))
        .unwrap();
    (seen, guard)
}

#[test]
fn resolve_initial_reports_persisted_identity() {
    let provider = MemoryProvider::new().with_persisted_identity(Identity::new("u1"));
    let (seen, _guard) = recorder(&provider);
    provider.resolve_initial();
    assert_eq!(*seen.borrow(), vec![Some("u1".to_owned())]);
}

#[test]
fn resolve_initial_without_identity_reports_absent() {
    let provider = MemoryProvider::new();
    let (seen, _guard) = recorder(&provider);
    provider.resolve_initial();
    assert_eq!(*seen.borrow(), vec![None]);
}

#[test]
fn queued_success_emits_change_and_returns_identity() {
    let provider = MemoryProvider::new();
    let (seen, _guard) = recorder(&provider);
    provider.queue_sign_in(SignInOutcome::Succeed(Identity::new("u2")));

    let identity = block_on(provider.sign_in_interactive()).unwrap();

    assert_eq!(identity.id, "u2");
    assert_eq!(*seen.borrow(), vec![Some("u2".to_owned())]);
    assert_eq!(provider.sign_in_calls(), 1);
}

#[test]
fn queued_failure_emits_nothing() {
    let provider = MemoryProvider::new();
    let (seen, _guard) = recorder(&provider);
    provider.queue_sign_in(SignInOutcome::Fail(ProviderError::Cancelled));

    let err = block_on(provider.sign_in_interactive()).unwrap_err();

    assert_eq!(err, ProviderError::Cancelled);
    assert!(seen.borrow().is_empty());
}

#[test]
fn default_identity_used_when_script_empty() {
    let provider = MemoryProvider::new().with_default_identity(Identity::new("demo"));
    let identity = block_on(provider.sign_in_interactive()).unwrap();
    assert_eq!(identity.id, "demo");
}

#[test]
fn no_default_identity_fails() {
    let provider = MemoryProvider::new();
    let err = block_on(provider.sign_in_interactive()).unwrap_err();
    assert!(matches!(err, ProviderError::Failed(_)));
}

#[test]
fn dropped_wait_sender_counts_as_cancel() {
    let provider = MemoryProvider::new();
    let (tx, rx) = oneshot::channel();
    provider.queue_sign_in(SignInOutcome::Wait(rx));
    drop(tx);
    let err = block_on(provider.sign_in_interactive()).unwrap_err();
    assert_eq!(err, ProviderError::Cancelled);
}

#[test]
fn sign_out_emits_absent() {
    let provider = MemoryProvider::new().with_persisted_identity(Identity::new("u1"));
    let (seen, _guard) = recorder(&provider);
    block_on(provider.sign_out()).unwrap();
    assert_eq!(*seen.borrow(), vec![None]);
}

#[test]
fn failed_sign_out_emits_nothing() {
    let provider = MemoryProvider::new();
    let (seen, _guard) = recorder(&provider);
    provider.fail_next_sign_out(ProviderError::Failed("503".into()));
    let err = block_on(provider.sign_out()).unwrap_err();
    assert_eq!(err, ProviderError::Failed("503".into()));
    assert!(seen.borrow().is_empty());
}

#[test]
fn refused_listener_registration_errors() {
    let provider = MemoryProvider::new();
    provider.refuse_listeners();
    let result = provider.on_change(Box::new(|_| {}));
    assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    assert_eq!(provider.listener_count(), 0);
}
