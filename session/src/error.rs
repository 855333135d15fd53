//! Error taxonomy for the session core.
//!
//! ERROR HANDLING
//! ==============
//! Adapters report [`ProviderError`]; the store translates it into an
//! [`AuthError`] naming the operation that failed. Neither error ever reaches
//! the rendering path: callers of `sign_in`/`sign_out` turn them into
//! transient notices via [`AuthError::notice`].

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure reported by an identity-provider adapter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The user dismissed the interactive flow.
    #[error("interactive flow was dismissed")]
    Cancelled,
    /// The provider was reached but the request failed.
    #[error("provider request failed: {0}")]
    Failed(String),
    /// The provider cannot be used in this environment.
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Failure surfaced by [`SessionStore`](crate::store::SessionStore) operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("sign-in was cancelled")]
    SignInCancelled,
    #[error("sign-in failed: {0}")]
    SignInFailed(String),
    /// A second sign-in was requested while one is still pending.
    #[error("a sign-in flow is already in progress")]
    SignInInProgress,
    #[error("sign-out failed: {0}")]
    SignOutFailed(String),
    /// The change listener could not be attached at start-up.
    #[error("session initialization failed: {0}")]
    Initialization(String),
    #[error("session store is already initialized")]
    AlreadyInitialized,
}

impl AuthError {
    /// Classify an adapter failure raised by interactive sign-in.
    #[must_use]
    pub fn from_sign_in(err: ProviderError) -> Self {
        match err {
            ProviderError::Cancelled => Self::SignInCancelled,
            ProviderError::Failed(msg) | ProviderError::Unavailable(msg) => Self::SignInFailed(msg),
        }
    }

    /// Classify an adapter failure raised by sign-out.
    #[must_use]
    pub fn from_sign_out(err: ProviderError) -> Self {
        match err {
            ProviderError::Cancelled => Self::SignOutFailed("sign-out was interrupted".to_owned()),
            ProviderError::Failed(msg) | ProviderError::Unavailable(msg) => Self::SignOutFailed(msg),
        }
    }

    /// Transient user-facing text, or `None` when the error stays silent.
    #[must_use]
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::SignInCancelled | Self::SignInInProgress | Self::AlreadyInitialized => None,
            Self::SignInFailed(_) => Some("Sign in failed. Please try again."),
            Self::SignOutFailed(_) => Some("Sign out failed. Please try again."),
            Self::Initialization(_) => Some("Sign-in is unavailable right now."),
        }
    }
}
