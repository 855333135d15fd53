//! Account page with identity details; signed-out visitors are sent to sign in.

use leptos::prelude::*;
use session::{IdentityMenu, IdentitySummary};

use crate::state::session::use_session;
use crate::util::auth::use_redirect_if_unauthenticated;

#[component]
pub fn AccountPage() -> impl IntoView {
    let ctx = use_session();
    use_redirect_if_unauthenticated();

    let summary = move || ctx.state.with(|s| s.identity.as_ref().map(IdentitySummary::from_identity));
    let signing_out = move || ctx.menu.with(IdentityMenu::sign_out_pending);

    move || {
        summary().map(|summary| {
            view! {
                <section class="account">
                    <img class="account__avatar" src=summary.avatar_src alt=summary.label.clone()/>
                    <h1>{summary.label}</h1>
                    {summary.email.map(|email| view! { <p class="account__email">{email}</p> })}
                    <p class="account__id">"Account ID: " {summary.id}</p>
                    <button class="btn" disabled=signing_out on:click=move |_| ctx.sign_out()>
                        {move || if signing_out() { "Signing out..." } else { "Sign out" }}
                    </button>
                </section>
            }
        })
    }
}
