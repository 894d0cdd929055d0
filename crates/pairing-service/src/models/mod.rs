//! Pairing service models.
//!
//! Contains the caller role enumeration and the query-parameter and
//! response types used by the HTTP handlers.

use serde::{Deserialize, Serialize};

/// Caller role enumeration.
///
/// Every caller is either a volunteer or a beneficiary; pairing always
/// joins one of each into a shared channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A caller offering assistance.
    Volunteer,

    /// A caller requesting assistance.
    Beneficiary,
}

impl Role {
    /// Returns the string representation of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Volunteer => "volunteer",
            Role::Beneficiary => "beneficiary",
        }
    }

    /// Returns the role a caller of this role pairs with.
    pub fn opposite(self) -> Role {
        match self {
            Role::Volunteer => Role::Beneficiary,
            Role::Beneficiary => Role::Volunteer,
        }
    }

    /// Parse a role from the `type` query parameter.
    ///
    /// Accepts the full role names and their single-letter short forms.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "volunteer" | "v" => Some(Role::Volunteer),
            "beneficiary" | "b" => Some(Role::Beneficiary),
            _ => None,
        }
    }
}

/// Query parameters for `GET /access_token`.
#[derive(Debug, Deserialize)]
pub struct AccessTokenParams {
    /// Channel the token grants access to. Required.
    #[serde(rename = "channelName")]
    pub channel_name: Option<String>,

    /// Caller uid embedded in the token. Defaults to "0".
    pub uid: Option<String>,

    /// Token role: "publisher" or anything else for subscriber.
    pub role: Option<String>,

    /// Token lifetime in seconds. Defaults to the configured TTL.
    #[serde(rename = "expireTime")]
    pub expire_time: Option<String>,
}

/// Response body for `GET /access_token`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed channel access token.
    pub token: String,
}

/// Query parameters for `GET /new_caller`.
#[derive(Debug, Deserialize)]
pub struct NewCallerParams {
    /// Opaque caller identifier. Required.
    pub id: Option<String>,

    /// Caller role ("volunteer"/"v" or "beneficiary"/"b"). Required.
    #[serde(rename = "type")]
    pub caller_type: Option<String>,
}

/// Response body for `GET /new_caller`.
///
/// The channel name is always present. The caller ids are present only
/// when this request completed a pair; the first arrival of a pair gets
/// the channel it will be joined on and waits (pull-based contract — the
/// service never pushes a notification to a waiting caller).
#[derive(Debug, Serialize, Deserialize)]
pub struct NewCallerResponse {
    /// Channel the caller should join.
    #[serde(rename = "channelName")]
    pub channel_name: String,

    /// Volunteer member of the completed pair, if this call paired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volunteer_id: Option<String>,

    /// Beneficiary member of the completed pair, if this call paired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiary_id: Option<String>,
}

/// Query parameters for `GET /invalidate_channel` and `GET /validate_channel`.
#[derive(Debug, Deserialize)]
pub struct ChannelParams {
    /// Channel identifier. Required.
    pub channel: Option<String>,
}

/// Response body for `GET /invalidate_channel`.
#[derive(Debug, Serialize, Deserialize)]
pub struct InvalidateResponse {
    /// Always true; invalidation is idempotent and never fails.
    pub invalidated: bool,
}

/// Response body for `GET /validate_channel`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    /// False iff the channel has been invalidated.
    pub is_valid: bool,
}

/// Query parameters for `GET /flush_queues`.
#[derive(Debug, Deserialize)]
pub struct FlushParams {
    /// Shared administrative secret. Required.
    pub cert: Option<String>,
}

/// Response body for `GET /flush_queues`.
#[derive(Debug, Serialize, Deserialize)]
pub struct FlushResponse {
    /// Number of waiting callers dropped from each queue.
    pub flushed: FlushCounts,
}

/// Per-role counts of flushed queue entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlushCounts {
    /// Entries dropped from the volunteer queue.
    pub volunteers: usize,

    /// Entries dropped from the beneficiary queue.
    pub beneficiaries: usize,
}
