//! Session configuration parsed from environment-style key/value sources.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_SIGN_IN_PATH: &str = "/auth/google";
pub const DEFAULT_AUTHENTICATED_REDIRECT: &str = "/dashboard";
pub const DEFAULT_SIGN_IN_REDIRECT: &str = "/login";
pub const DEFAULT_POPUP_POLL_MS: u32 = 500;

pub const KEY_PROVIDER: &str = "SESSION_PROVIDER";
pub const KEY_AUTH_BASE_URL: &str = "SESSION_AUTH_BASE_URL";
pub const KEY_SIGN_IN_PATH: &str = "SESSION_SIGN_IN_PATH";
pub const KEY_AUTHENTICATED_REDIRECT: &str = "SESSION_AUTHENTICATED_REDIRECT";
pub const KEY_SIGN_IN_REDIRECT: &str = "SESSION_SIGN_IN_REDIRECT";
pub const KEY_POPUP_POLL_MS: &str = "SESSION_POPUP_POLL_MS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown SESSION_PROVIDER: {0}")]
    UnknownProvider(String),
    #[error("{key} must be a positive integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be an absolute path starting with '/', got '{value}'")]
    InvalidPath { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Backend identity endpoints reached over HTTP.
    #[default]
    Http,
    /// In-process demo provider; no backend required.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub provider: ProviderKind,
    /// Prefix for identity endpoints; empty means same origin.
    pub auth_base_url: String,
    pub sign_in_path: String,
    pub authenticated_redirect: String,
    pub sign_in_redirect: String,
    pub popup_poll_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Http,
            auth_base_url: String::new(),
            sign_in_path: DEFAULT_SIGN_IN_PATH.to_owned(),
            authenticated_redirect: DEFAULT_AUTHENTICATED_REDIRECT.to_owned(),
            sign_in_redirect: DEFAULT_SIGN_IN_REDIRECT.to_owned(),
            popup_poll_ms: DEFAULT_POPUP_POLL_MS,
        }
    }
}

impl SessionConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `SESSION_PROVIDER`: `http` (default) or `memory`
    /// - `SESSION_AUTH_BASE_URL`: endpoint prefix, default same origin
    /// - `SESSION_SIGN_IN_PATH`: default `/auth/google`
    /// - `SESSION_AUTHENTICATED_REDIRECT`: default `/dashboard`
    /// - `SESSION_SIGN_IN_REDIRECT`: default `/login`
    /// - `SESSION_POPUP_POLL_MS`: default 500
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unparseable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup (compile-time env, tests, ...).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let provider = parse_provider(value(KEY_PROVIDER).as_deref())?;
        let auth_base_url = value(KEY_AUTH_BASE_URL)
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_owned();
        let sign_in_path = parse_path(KEY_SIGN_IN_PATH, value(KEY_SIGN_IN_PATH), DEFAULT_SIGN_IN_PATH)?;
        let authenticated_redirect = parse_path(
            KEY_AUTHENTICATED_REDIRECT,
            value(KEY_AUTHENTICATED_REDIRECT),
            DEFAULT_AUTHENTICATED_REDIRECT,
        )?;
        let sign_in_redirect =
            parse_path(KEY_SIGN_IN_REDIRECT, value(KEY_SIGN_IN_REDIRECT), DEFAULT_SIGN_IN_REDIRECT)?;
        let popup_poll_ms = parse_positive(KEY_POPUP_POLL_MS, value(KEY_POPUP_POLL_MS), DEFAULT_POPUP_POLL_MS)?;

        Ok(Self {
            provider,
            auth_base_url,
            sign_in_path,
            authenticated_redirect,
            sign_in_redirect,
            popup_poll_ms,
        })
    }

    /// Absolute or origin-relative URL for an identity endpoint path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.auth_base_url)
    }
}

fn parse_provider(raw: Option<&str>) -> Result<ProviderKind, ConfigError> {
    match raw.unwrap_or("http") {
        "http" => Ok(ProviderKind::Http),
        "memory" => Ok(ProviderKind::Memory),
        other => Err(ConfigError::UnknownProvider(other.to_owned())),
    }
}

fn parse_path(key: &'static str, raw: Option<String>, default: &str) -> Result<String, ConfigError> {
    match raw {
        None => Ok(default.to_owned()),
        Some(path) if path.starts_with('/') => Ok(path),
        Some(value) => Err(ConfigError::InvalidPath { key, value }),
    }
}

fn parse_positive(key: &'static str, raw: Option<String>, default: u32) -> Result<u32, ConfigError> {
    let Some(value) = raw else {
        return Ok(default);
    };
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber { key, value }),
    }
}
