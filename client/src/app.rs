//! Root application component with routing and the session context.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::pages::{account::AccountPage, dashboard::DashboardPage, landing::LandingPage, login::LoginPage};
use crate::state::session::{SessionContext, load_config};

/// Root application component.
///
/// Builds the session context once and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionContext::new(load_config());
    provide_context(session);
    on_cleanup(move || session.teardown());

    view! {
        <Title text="Portfolio"/>

        <Router>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=LandingPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("account") view=AccountPage/>
                </Routes>
            </main>
        </Router>
    }
}
