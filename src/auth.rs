//! WSSE `UsernameToken` signing.
//!
//! Every signed request carries an `X-WSSE` header derived from the user name
//! and the shared secret:
//!
//! ```text
//! UsernameToken Username="user:company", PasswordDigest="...", Nonce="...", Created="..."
//! ```
//!
//! The digest is `base64(sha1(nonce + created + secret))` computed over the raw
//! nonce, while the header carries the nonce base64-encoded.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use sha1::{Digest, Sha1};
use uuid::Uuid;

/// Name of the header carrying the token.
pub const WSSE_HEADER: &str = "X-WSSE";

/// The method that fetches a user's shared secret. It is never signed.
pub const LOGIN_KEY_METHOD: &str = "Company.GetLoginKey";

/// Format of the `Created` timestamp, always in UTC.
pub const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Computes `base64(sha1(nonce + created + secret))`.
pub fn password_digest(nonce: &str, created: &str, secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(nonce.as_bytes());
    hasher.update(created.as_bytes());
    hasher.update(secret.as_bytes());
    STANDARD.encode(hasher.finalize())
}

/// A signed WSSE token for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsernameToken {
    /// User name, suffixed with `:company` when a company is configured.
    pub username: String,
    /// The raw nonce.
    pub nonce: String,
    /// Creation time formatted with [`CREATED_FORMAT`].
    pub created: String,
    /// The password digest.
    pub digest: String,
}

impl UsernameToken {
    /// Signs a token from explicit parts.
    pub fn new(
        username: impl Into<String>,
        nonce: impl Into<String>,
        created: impl Into<String>,
        secret: &str,
    ) -> Self {
        let nonce = nonce.into();
        let created = created.into();
        let digest = password_digest(&nonce, &created, secret);
        Self {
            username: username.into(),
            nonce,
            created,
            digest,
        }
    }

    /// Signs a token with a fresh random nonce and the current time.
    pub fn generate(user: &str, company: Option<&str>, secret: &str) -> Self {
        let username = match company {
            Some(company) => format!("{user}:{company}"),
            None => user.to_string(),
        };
        let created = Utc::now().format(CREATED_FORMAT).to_string();
        Self::new(username, Uuid::new_v4().to_string(), created, secret)
    }

    /// The nonce as sent on the wire.
    pub fn encoded_nonce(&self) -> String {
        STANDARD.encode(self.nonce.as_bytes())
    }

    /// Renders the `X-WSSE` header value.
    pub fn header_value(&self) -> String {
        format!(
            "UsernameToken Username=\"{}\", PasswordDigest=\"{}\", Nonce=\"{}\", Created=\"{}\"",
            self.username,
            self.digest,
            self.encoded_nonce(),
            self.created
        )
    }
}
