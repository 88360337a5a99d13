use crate::{AuthError, AuthResult};

use std::{fmt, panic::Location};

use chrono::{DateTime, NaiveDateTime, Utc};
use error_location::ErrorLocation;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

/// Login credentials. Lives only as long as the request that carries it.
pub struct Credentials {
    /// Account identifier (the email address).
    pub identifier: String,
    /// Account password.
    pub secret: SecretString,
}

impl Credentials {
    /// Build credentials from plain strings.
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: SecretString::new(secret.into()),
        }
    }
}

/// Signup form with the password typed twice.
pub struct SignupForm {
    /// Email to register.
    pub email: String,
    /// Chosen password.
    pub password: SecretString,
    /// Password repeated for confirmation.
    pub confirm_password: SecretString,
}

impl SignupForm {
    /// Build a signup form from plain strings.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into()),
            confirm_password: SecretString::new(confirm_password.into()),
        }
    }

    /// Check the form locally. Never touches the network.
    #[track_caller]
    pub fn validate(&self) -> AuthResult<()> {
        validate_non_blank(&self.email, self.password.expose_secret())?;

        if self.password.expose_secret() != self.confirm_password.expose_secret() {
            return Err(AuthError::InvalidInput {
                reason: "Passwords do not match".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}

#[track_caller]
pub(crate) fn validate_non_blank(email: &str, password: &str) -> AuthResult<()> {
    if email.trim().is_empty() {
        return Err(AuthError::InvalidInput {
            reason: "Email is required".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    if password.is_empty() {
        return Err(AuthError::InvalidInput {
            reason: "Password is required".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}

/// Access token issued by a successful login.
pub struct AuthToken {
    /// Opaque token value.
    pub value: SecretString,
    /// Authorization scheme, e.g. `bearer`.
    pub scheme: String,
}

impl AuthToken {
    /// Build a token from plain strings.
    pub fn new(value: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            value: SecretString::new(value.into()),
            scheme: scheme.into(),
        }
    }

    /// `Authorization` header value: `<scheme> <value>`.
    pub(crate) fn header_value(&self) -> String {
        format!("{} {}", self.scheme, self.value.expose_secret())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &"[REDACTED]")
            .field("scheme", &self.scheme)
            .finish()
    }
}

/// Server view of the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server-assigned id.
    pub id: i64,
    /// Account email.
    pub email: String,
    /// Account creation time.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Liveness check response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    /// Reported status, `"healthy"` on the reference server.
    pub status: String,
}

#[derive(Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

// The identity protocol requires these exact field names.
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub(crate) username: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    pub(crate) token_type: String,
}

#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) detail: serde_json::Value,
}

impl ErrorBody {
    /// Readable message from `detail`, if it carries one.
    ///
    /// Validation failures arrive as a list of `{msg, ...}` objects.
    pub(crate) fn message(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join("; "))
                }
            }
            _ => None,
        }
    }
}

/// Parse the server detail out of a raw error body, falling back when the
/// body is empty, not JSON, or has no usable `detail`.
pub(crate) fn detail_or(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message())
        .unwrap_or_else(|| fallback.to_string())
}

// Accepts RFC 3339 as well as naive ISO-8601 (taken as UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}
