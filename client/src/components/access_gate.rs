//! Route guard rendering protected content only for a signed-in identity.

use leptos::prelude::*;
use session::{GateDecision, IdentityMenu, SessionStore};

use crate::state::session::use_session;

/// Render `children` when signed in, a spinner while resolving and a sign-in
/// prompt otherwise. Re-renders only when the decision changes.
#[component]
pub fn AccessGate(children: ChildrenFn) -> impl IntoView {
    let ctx = use_session();
    let decision = RwSignal::new(ctx.store.with_value(SessionStore::decision));
    let watcher = ctx
        .store
        .with_value(|store| session::AccessGate::mount(store, move |next| decision.set(next.clone())));
    let _watcher = StoredValue::new_local(watcher);

    move || match decision.get() {
        GateDecision::Resolving => view! { <LoadingSpinner/> }.into_any(),
        GateDecision::Denied => view! { <SignInPrompt/> }.into_any(),
        GateDecision::Granted(_) => children().into_any(),
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="gate gate--loading" role="status" aria-live="polite">
            <span class="spinner"></span>
            <span class="sr-only">"Checking your session..."</span>
        </div>
    }
}

#[component]
pub fn SignInPrompt() -> impl IntoView {
    let ctx = use_session();
    let pending = move || ctx.menu.with(IdentityMenu::sign_in_pending);

    view! {
        <div class="gate gate--denied">
            <h2>"Sign in to view your portfolio"</h2>
            <p>"Your dashboard is available once you are signed in."</p>
            <button class="btn btn--primary" disabled=pending on:click=move |_| ctx.sign_in()>
                {move || if pending() { "Signing in..." } else { "Sign in" }}
            </button>
        </div>
    }
}
