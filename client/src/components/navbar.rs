//! Top navigation bar with the identity menu.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bar renders one of three identity affordances: a placeholder while the
//! session resolves, a "Get Started" sign-in button, or the account menu with
//! avatar, links and sign-out. Failures surface as a dismissible notice.

use leptos::prelude::*;
use session::{IdentityMenu, IdentitySummary, MenuView};

use crate::state::session::use_session;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_session();
    let menu_view = move || ctx.menu.with(|menu| menu.view(&ctx.state.get()));

    view! {
        <header class="navbar">
            <a class="navbar__brand" href="/">"Portfolio"</a>
            <nav class="navbar__identity">
                {move || match menu_view() {
                    MenuView::Loading => {
                        view! { <span class="navbar__loading" aria-busy="true"></span> }.into_any()
                    }
                    MenuView::GetStarted { pending } => {
                        view! {
                            <button
                                class="btn btn--primary"
                                disabled=pending
                                on:click=move |_| ctx.sign_in()
                            >
                                {if pending { "Signing in..." } else { "Get Started" }}
                            </button>
                        }
                            .into_any()
                    }
                    MenuView::Account { summary, open, signing_out } => {
                        view! { <AccountMenu summary=summary open=open signing_out=signing_out/> }
                            .into_any()
                    }
                }}
            </nav>
            <NoticeBanner/>
        </header>
    }
}

/// Avatar trigger plus dropdown; opens on hover or click.
#[component]
fn AccountMenu(summary: IdentitySummary, open: bool, signing_out: bool) -> impl IntoView {
    let ctx = use_session();
    let IdentitySummary {
        label,
        email,
        avatar_src,
        ..
    } = summary;

    view! {
        <div
            class="identity-menu"
            on:mouseenter=move |_| ctx.menu.update(IdentityMenu::open)
            on:mouseleave=move |_| ctx.menu.update(IdentityMenu::close)
        >
            <button
                class="identity-menu__trigger"
                aria-haspopup="menu"
                aria-expanded=open.to_string()
                on:click=move |_| ctx.menu.update(IdentityMenu::toggle)
            >
                <img class="identity-menu__avatar" src=avatar_src alt=label.clone()/>
                <span class="identity-menu__label">{label.clone()}</span>
            </button>
            {open
                .then(|| {
                    view! {
                        <div class="identity-menu__panel" role="menu">
                            <div class="identity-menu__header">
                                <strong>{label}</strong>
                                {email.map(|email| view! { <span class="identity-menu__email">{email}</span> })}
                            </div>
                            <a class="identity-menu__item" href="/dashboard" role="menuitem">"Dashboard"</a>
                            <a class="identity-menu__item" href="/account" role="menuitem">"Account"</a>
                            <button
                                class="identity-menu__item identity-menu__item--danger"
                                role="menuitem"
                                disabled=signing_out
                                on:click=move |_| ctx.sign_out()
                            >
                                {if signing_out { "Signing out..." } else { "Sign out" }}
                            </button>
                        </div>
                    }
                })}
        </div>
    }
}

/// Transient failure text from the last sign-in or sign-out attempt.
#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ctx = use_session();
    move || {
        ctx.menu.with(|m| m.notice().map(str::to_owned)).map(|notice| {
            view! {
                <div class="notice" role="alert">
                    <span>{notice}</span>
                    <button
                        class="notice__dismiss"
                        aria-label="Dismiss"
                        on:click=move |_| ctx.menu.update(IdentityMenu::dismiss_notice)
                    >
                        "×"
                    </button>
                </div>
            }
        })
    }
}
