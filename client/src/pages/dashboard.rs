//! Dashboard page, shown only to signed-in users.

use leptos::prelude::*;

use crate::components::access_gate::AccessGate;
use crate::state::session::use_session;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <AccessGate>
            <DashboardContent/>
        </AccessGate>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let ctx = use_session();
    let greeting = move || {
        ctx.state.with(|s| {
            s.identity
                .as_ref()
                .map_or_else(String::new, |identity| format!("Welcome back, {}", identity.label()))
        })
    };

    view! {
        <section class="dashboard">
            <h1>{greeting}</h1>
            <p class="dashboard__subtitle">"Your portfolio overview will appear here."</p>
        </section>
    }
}
