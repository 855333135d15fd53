//! Signed-in principal as reported by the identity provider.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use serde::{Deserialize, Serialize};

/// Label shown when the provider supplied no display name.
pub const FALLBACK_LABEL: &str = "User";

/// Public profile of the authenticated principal.
///
/// Replaced wholesale on every identity-change event; never edited in place.
/// Deserializes from provider records that may carry several spellings of the
/// same attribute; see [`RawIdentity`] for precedence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawIdentity")]
pub struct Identity {
    /// Stable unique identifier assigned by the provider.
    pub id: String,
    /// Human-readable name, if the provider exposes one.
    pub display_name: Option<String>,
    /// Contact email, if shared.
    pub email: Option<String>,
    /// Profile picture URL.
    pub avatar_url: Option<String>,
}

/// Provider record as received. Every spelling is its own field so records
/// carrying more than one of them still parse.
///
/// Precedence: `display_name` > `displayName` > `name` for the display name,
/// `avatar_url` > `photoURL` > `photo_url` for the avatar.
#[derive(Deserialize)]
struct RawIdentity {
    id: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default, rename = "displayName")]
    display_name_camel: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default, rename = "photoURL")]
    photo_url_camel: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
}

impl From<RawIdentity> for Identity {
    fn from(raw: RawIdentity) -> Self {
        Self {
            id: raw.id,
            display_name: raw.display_name.or(raw.display_name_camel).or(raw.name),
            email: raw.email,
            avatar_url: raw.avatar_url.or(raw.photo_url_camel).or(raw.photo_url),
        }
    }
}

impl Identity {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            email: None,
            avatar_url: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// Display name, or [`FALLBACK_LABEL`] when missing or blank.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_LABEL)
    }
}
