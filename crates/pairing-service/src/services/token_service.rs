//! Channel access token issuance.
//!
//! Stateless: a token is a pure function of its inputs and the signing
//! secret. Tokens are HS256 JWTs carrying the channel grant; expiry is
//! enforced by whoever verifies the token, not by this service.

use crate::errors::PairingError;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Role a channel token grants.
///
/// Anything other than "publisher" in the query falls back to subscriber,
/// so an absent or garbled role degrades to the least-privileged grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRole {
    Publisher,
    Subscriber,
}

impl TokenRole {
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("publisher") => TokenRole::Publisher,
            _ => TokenRole::Subscriber,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokenRole::Publisher => "publisher",
            TokenRole::Subscriber => "subscriber",
        }
    }
}

/// Claims carried by a channel access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelClaims {
    /// Application identifier.
    pub app_id: String,

    /// Channel the token grants access to.
    pub channel: String,

    /// Caller uid ("0" when the caller supplied none).
    pub uid: String,

    /// Granted role ("publisher" or "subscriber").
    pub role: String,

    /// Issued-at, seconds since epoch.
    pub iat: i64,

    /// Expiry, seconds since epoch.
    pub exp: i64,
}

/// Build a signed channel access token.
pub fn issue_channel_token(
    app_id: &str,
    app_certificate: &str,
    channel: &str,
    uid: &str,
    role: TokenRole,
    ttl_seconds: u64,
) -> Result<String, PairingError> {
    let now = Utc::now().timestamp();
    let claims = ChannelClaims {
        app_id: app_id.to_string(),
        channel: channel.to_string(),
        uid: uid.to_string(),
        role: role.as_str().to_string(),
        iat: now,
        exp: now.saturating_add_unsigned(ttl_seconds),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(app_certificate.as_bytes()),
    )
    .map_err(|e| PairingError::Signing(e.to_string()))
}
