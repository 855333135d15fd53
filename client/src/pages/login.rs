//! Sign-in page; signed-in visitors are sent on to the dashboard.

use leptos::prelude::*;
use session::IdentityMenu;

use crate::state::session::use_session;
use crate::util::auth::use_redirect_if_authenticated;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_session();
    use_redirect_if_authenticated();

    let resolving = move || ctx.state.with(|s| s.resolving);
    let pending = move || ctx.menu.with(IdentityMenu::sign_in_pending);

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Portfolio"</h1>
                <p class="login-card__subtitle">"Sign in to see your dashboard"</p>
                <button
                    class="login-button"
                    disabled=move || resolving() || pending()
                    on:click=move |_| ctx.sign_in()
                >
                    {move || if pending() { "Waiting for sign-in..." } else { "Sign in with Google" }}
                </button>
            </div>
        </div>
    }
}
