//! Navigation-bar identity menu model.
//!
//! DESIGN
//! ======
//! The menu owns only local UI state: whether the disclosure is open, which
//! action is pending, and an optional transient notice. Identity data comes
//! from the `SessionState` passed to [`IdentityMenu::view`] on each render.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use crate::error::AuthError;
use crate::identity::Identity;
use crate::state::SessionState;

const AVATAR_FALLBACK_BASE: &str = "https://ui-avatars.com/api/";

/// Display data derived from an [`Identity`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentitySummary {
    pub id: String,
    pub label: String,
    pub email: Option<String>,
    pub avatar_src: String,
}

impl IdentitySummary {
    #[must_use]
    pub fn from_identity(identity: &Identity) -> Self {
        let label = identity.label().to_owned();
        let avatar_src = identity
            .avatar_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .map_or_else(|| fallback_avatar(&label), str::to_owned);
        Self {
            id: identity.id.clone(),
            label,
            email: identity.email.clone(),
            avatar_src,
        }
    }
}

/// Generated initials avatar for identities without a picture.
#[must_use]
pub fn fallback_avatar(label: &str) -> String {
    format!(
        "{AVATAR_FALLBACK_BASE}?name={}&background=3b82f6&color=fff",
        urlencoding::encode(label)
    )
}

/// What the menu should render for the current session state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuView {
    Loading,
    GetStarted {
        pending: bool,
    },
    Account {
        summary: IdentitySummary,
        open: bool,
        signing_out: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityMenu {
    open: bool,
    sign_in_pending: bool,
    sign_out_pending: bool,
    notice: Option<String>,
}

impl IdentityMenu {
    #[must_use]
    pub fn view(&self, state: &SessionState) -> MenuView {
        if state.resolving {
            return MenuView::Loading;
        }
        match &state.identity {
            None => MenuView::GetStarted {
                pending: self.sign_in_pending,
            },
            Some(identity) => MenuView::Account {
                summary: IdentitySummary::from_identity(identity),
                open: self.open,
                signing_out: self.sign_out_pending,
            },
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    #[must_use]
    pub fn sign_in_pending(&self) -> bool {
        self.sign_in_pending
    }

    #[must_use]
    pub fn sign_out_pending(&self) -> bool {
        self.sign_out_pending
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Mark sign-in as pending. Returns `false` when one is already running,
    /// in which case the caller must not start another flow.
    pub fn begin_sign_in(&mut self) -> bool {
        if self.sign_in_pending {
            return false;
        }
        self.sign_in_pending = true;
        self.notice = None;
        true
    }

    pub fn finish_sign_in(&mut self, result: &Result<Identity, AuthError>) {
        self.sign_in_pending = false;
        if let Err(err) = result {
            self.notice = err.notice().map(str::to_owned);
        }
    }

    pub fn begin_sign_out(&mut self) -> bool {
        if self.sign_out_pending {
            return false;
        }
        self.sign_out_pending = true;
        self.notice = None;
        true
    }

    pub fn finish_sign_out(&mut self, result: &Result<(), AuthError>) {
        self.sign_out_pending = false;
        match result {
            Ok(()) => self.open = false,
            Err(err) => self.notice = err.notice().map(str::to_owned),
        }
    }

    /// Sync local state with a new session snapshot: a completed sign-out
    /// closes the disclosure.
    pub fn observe(&mut self, state: &SessionState) {
        if state.is_unauthenticated() {
            self.open = false;
        }
    }
}
