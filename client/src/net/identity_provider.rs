//! HTTP identity provider for the portfolio API.
//!
//! Client-side (csr): real calls via `gloo-net`, interactive sign-in through
//! a popup window opened with `web-sys`.
//! Native builds: stubs reporting the provider as unavailable, since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Initial resolution never fails: a transport error resolves the session as
//! signed-out so the UI does not stay in its loading state. Interactive flows
//! surface `ProviderError` to the store, which classifies it.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "identity_provider_test.rs"]
mod identity_provider_test;

use async_trait::async_trait;
use session::{ChangeHandler, ChangeStream, Identity, IdentityProvider, ProviderError, SessionConfig, Subscription};

pub const ME_PATH: &str = "/api/auth/me";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

#[cfg(feature = "csr")]
const POPUP_TARGET: &str = "portfolio-sign-in";
#[cfg(feature = "csr")]
const POPUP_FEATURES: &str = "width=500,height=640,menubar=no,toolbar=no";

/// 401/403 from `me` means "no session", not a failure.
#[cfg(any(test, feature = "csr"))]
fn is_signed_out_status(status: u16) -> bool {
    matches!(status, 401 | 403)
}

#[cfg(any(test, feature = "csr"))]
fn request_failed_message(action: &str, status: u16) -> String {
    format!("{action} failed: {status}")
}

#[cfg(any(test, feature = "csr"))]
fn parse_identity(body: &str) -> Result<Identity, ProviderError> {
    let identity: Identity =
        serde_json::from_str(body).map_err(|e| ProviderError::Failed(format!("malformed identity: {e}")))?;
    if identity.id.trim().is_empty() {
        return Err(ProviderError::Failed("identity has an empty id".to_owned()));
    }
    Ok(identity)
}

/// Identity provider backed by the cookie session of the portfolio API.
pub struct HttpIdentityProvider {
    config: SessionConfig,
    stream: ChangeStream,
}

impl HttpIdentityProvider {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            stream: ChangeStream::new(),
        }
    }

    /// Read the current server session and deliver the first change event.
    pub async fn resolve_initial(&self) {
        let identity = match self.fetch_current().await {
            Ok(identity) => identity,
            Err(err) => {
                leptos::logging::warn!("identity lookup failed, treating as signed out: {err}");
                None
            }
        };
        self.stream.emit(identity);
    }

    /// Fetch the identity behind the current session cookie.
    async fn fetch_current(&self) -> Result<Option<Identity>, ProviderError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::get(&self.config.endpoint(ME_PATH))
                .send()
                .await
                .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
            if is_signed_out_status(resp.status()) {
                return Ok(None);
            }
            if !resp.ok() {
                return Err(ProviderError::Failed(request_failed_message("identity lookup", resp.status())));
            }
            let body = resp
                .text()
                .await
                .map_err(|e| ProviderError::Failed(e.to_string()))?;
            parse_identity(&body).map(Some)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ProviderError::Unavailable(format!(
                "{} is only reachable from the browser",
                self.config.endpoint(ME_PATH)
            )))
        }
    }

    /// Open the sign-in popup and wait until the user closes it or the
    /// backend redirect closes it.
    #[cfg(feature = "csr")]
    async fn run_popup(&self) -> Result<(), ProviderError> {
        let window = web_sys::window().ok_or_else(|| ProviderError::Unavailable("no window".to_owned()))?;
        let url = self.config.endpoint(&self.config.sign_in_path);
        let popup = window
            .open_with_url_and_target_and_features(&url, POPUP_TARGET, POPUP_FEATURES)
            .ok()
            .flatten()
            .ok_or_else(|| ProviderError::Failed("sign-in popup was blocked".to_owned()))?;
        let interval = std::time::Duration::from_millis(u64::from(self.config.popup_poll_ms));
        loop {
            gloo_timers::future::sleep(interval).await;
            if popup.closed().unwrap_or(true) {
                return Ok(());
            }
        }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in_interactive(&self) -> Result<Identity, ProviderError> {
        #[cfg(feature = "csr")]
        {
            self.run_popup().await?;
            match self.fetch_current().await? {
                Some(identity) => {
                    self.stream.emit(Some(identity.clone()));
                    Ok(identity)
                }
                // Popup closed without establishing a session.
                None => Err(ProviderError::Cancelled),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ProviderError::Unavailable(format!(
                "{} requires a browser",
                self.config.sign_in_path
            )))
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.config.endpoint(LOGOUT_PATH))
                .send()
                .await
                .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
            if !resp.ok() {
                return Err(ProviderError::Failed(request_failed_message("sign out", resp.status())));
            }
            self.stream.emit(None);
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ProviderError::Unavailable(format!(
                "{} is only reachable from the browser",
                self.config.endpoint(LOGOUT_PATH)
            )))
        }
    }

    fn on_change(&self, handler: ChangeHandler) -> Result<Subscription, ProviderError> {
        Ok(self.stream.listen(handler))
    }
}
