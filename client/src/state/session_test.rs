use super::*;

#[test]
fn unknown_keys_have_no_compile_time_value() {
    assert_eq!(compile_time_value("SESSION_NOT_A_KEY"), None);
}

#[test]
fn loaded_config_is_usable() {
    let cfg = load_config();
    assert!(cfg.authenticated_redirect.starts_with('/'));
    assert!(cfg.sign_in_redirect.starts_with('/'));
    assert!(cfg.popup_poll_ms > 0);
}

#[test]
fn demo_identity_has_display_data() {
    let identity = demo_identity();
    assert_eq!(identity.label(), "Demo Investor");
    assert!(identity.email.is_some());
}

// =============================================================
// SessionContext (memory provider)
// =============================================================

fn memory_config() -> SessionConfig {
    SessionConfig {
        provider: ProviderKind::Memory,
        ..SessionConfig::default()
    }
}

#[test]
fn mirror_is_read_only_and_follows_store() {
    Owner::new().with(|| {
        let ctx = SessionContext::new(memory_config());
        let mirror: ReadSignal<SessionState> = ctx.state;
        assert_eq!(mirror.get_untracked(), SessionState::resolved(None));

        let store = ctx.store.get_value();
        let identity = futures::executor::block_on(store.sign_in()).unwrap();

        assert_eq!(identity, demo_identity());
        assert_eq!(mirror.get_untracked(), store.get_state());
        assert!(mirror.get_untracked().is_authenticated());
    });
}

#[test]
fn sign_out_through_store_closes_mirrored_menu() {
    Owner::new().with(|| {
        let ctx = SessionContext::new(memory_config());
        let store = ctx.store.get_value();
        futures::executor::block_on(store.sign_in()).unwrap();
        ctx.menu.update(IdentityMenu::open);

        futures::executor::block_on(store.sign_out()).unwrap();

        assert_eq!(ctx.state.get_untracked(), SessionState::resolved(None));
        assert!(!ctx.menu.get_untracked().is_open());
    });
}

#[test]
fn teardown_stops_mirroring() {
    Owner::new().with(|| {
        let ctx = SessionContext::new(memory_config());
        let store = ctx.store.get_value();
        ctx.teardown();

        futures::executor::block_on(store.sign_in()).unwrap();

        assert_eq!(ctx.state.get_untracked(), SessionState::resolved(None));
    });
}
