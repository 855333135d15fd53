//! Public landing page with the "Get Started" call to action.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::use_session;

/// Landing page. The CTA goes straight to the dashboard for signed-in
/// visitors and starts interactive sign-in for everyone else.
#[component]
pub fn LandingPage() -> impl IntoView {
    let ctx = use_session();
    let navigate = use_navigate();

    let on_get_started = move |_| {
        if ctx.state.get_untracked().is_authenticated() {
            let destination = ctx.config.with_value(|cfg| cfg.authenticated_redirect.clone());
            navigate(&destination, NavigateOptions::default());
        } else {
            ctx.sign_in();
        }
    };
    let pending = move || ctx.menu.with(session::IdentityMenu::sign_in_pending);

    view! {
        <section class="landing">
            <h1>"Your investments, in one place"</h1>
            <p class="landing__subtitle">
                "Track holdings, performance and allocation across every account."
            </p>
            <button class="btn btn--primary btn--large" disabled=pending on:click=on_get_started>
                {move || if pending() { "Signing in..." } else { "Get Started" }}
            </button>
        </section>
    }
}
