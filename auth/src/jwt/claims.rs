use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

const USERNAME: &str = "username";
const IS_ADMIN: &str = "is_admin";

/// Token payload: registered claims plus flattened custom fields.
///
/// Issued tokens always carry `sub`, `iat`, `exp` and `jti`, with the display
/// name and admin flag under `username` and `is_admin`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims for an authenticated principal with automatic expiration.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier (stored in `sub`)
    /// * `username` - Display name (stored in `extra.username`)
    /// * `is_admin` - Admin flag (stored in `extra.is_admin`)
    /// * `expiration_hours` - Hours until token expires
    pub fn for_principal(
        user_id: impl ToString,
        username: impl Into<String>,
        is_admin: bool,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(expiration_hours);

        let mut extra = HashMap::new();
        extra.insert(USERNAME.to_string(), serde_json::json!(username.into()));
        extra.insert(IS_ADMIN.to_string(), serde_json::json!(is_admin));

        Self {
            sub: Some(user_id.to_string()),
            exp: Some(expiration.timestamp()),
            iat: Some(now.timestamp()),
            jti: None,
            extra,
        }
    }

    pub fn with_token_id(mut self, jti: impl ToString) -> Self {
        self.jti = Some(jti.to_string());
        self
    }

    pub fn username(&self) -> Option<&str> {
        self.extra.get(USERNAME).and_then(|v| v.as_str())
    }

    /// Absent or non-boolean means not an admin.
    pub fn is_admin(&self) -> bool {
        self.extra
            .get(IS_ADMIN)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}
