use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Fallback shown when a rejected signup carries no usable `detail`.
pub const SIGNUP_FAILED: &str = "Signup failed";
/// Fallback shown when a rejected login carries no usable `detail`.
pub const LOGIN_FAILED: &str = "Login failed";
/// Fixed message for a failed current-user lookup.
pub const USER_INFO_FAILED: &str = "Failed to get user info";

/// Coarse category of an [`AuthError`], for callers that branch on the
/// failure without caring about its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// Request never reached the server, or the response could not be decoded.
    Transport,
    /// Server refused the signup.
    SignupRejected,
    /// Server refused the login.
    LoginRejected,
    /// Current-user lookup was refused.
    Unauthorized,
    /// Local validation failed before any request was sent.
    InvalidInput,
    /// Credential storage could not be read or written.
    Storage,
}

/// Authentication errors with source location tracking.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Network or decoding failure.
    #[error("Transport error: {source} {location}")]
    Transport {
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Signup returned a non-success status.
    #[error("Signup rejected: {detail} {location}")]
    SignupRejected {
        /// Server-provided detail, or [`SIGNUP_FAILED`].
        detail: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Login returned a non-success status.
    #[error("Login rejected: {detail} {location}")]
    LoginRejected {
        /// Server-provided detail, or [`LOGIN_FAILED`].
        detail: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Current-user lookup returned a non-success status.
    #[error("Unauthorized: Failed to get user info {location}")]
    Unauthorized {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Form-level validation failed; no request was issued.
    #[error("Invalid input: {reason} {location}")]
    InvalidInput {
        /// Human-readable reason for failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Credential store failure.
    #[error("Credential storage error: {reason} {location}")]
    Storage {
        /// Human-readable reason for failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Category of this error.
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::Transport { .. } => AuthErrorKind::Transport,
            AuthError::SignupRejected { .. } => AuthErrorKind::SignupRejected,
            AuthError::LoginRejected { .. } => AuthErrorKind::LoginRejected,
            AuthError::Unauthorized { .. } => AuthErrorKind::Unauthorized,
            AuthError::InvalidInput { .. } => AuthErrorKind::InvalidInput,
            AuthError::Storage { .. } => AuthErrorKind::Storage,
        }
    }

    /// User-facing message, without the call-site suffix carried by `Display`.
    pub fn message(&self) -> String {
        match self {
            AuthError::Transport { source, .. } => source.to_string(),
            AuthError::SignupRejected { detail, .. } | AuthError::LoginRejected { detail, .. } => {
                detail.clone()
            }
            AuthError::Unauthorized { .. } => USER_INFO_FAILED.to_string(),
            AuthError::InvalidInput { reason, .. } | AuthError::Storage { reason, .. } => {
                reason.clone()
            }
        }
    }
}

// Cannot use #[from] because it does not support extra fields.
impl From<reqwest::Error> for AuthError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        AuthError::Transport {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Roster construction errors.
#[derive(Error, Debug)]
pub enum RosterError {
    /// Roster must have exactly one host.
    #[error("Roster must have exactly one host, found {hosts} {location}")]
    HostCount {
        /// Number of hosts found.
        hosts: usize,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Two participants share an id.
    #[error("Duplicate participant id: {id} {location}")]
    DuplicateId {
        /// The repeated id.
        id: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A participant has a blank id or display name.
    #[error("Invalid participant: {reason} {location}")]
    InvalidParticipant {
        /// Human-readable reason for failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Studio session creation and join errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Session title was blank.
    #[error("Please enter a session name {location}")]
    MissingTitle {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Session code was blank.
    #[error("Please enter a session ID {location}")]
    MissingCode {
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl SessionError {
    /// User-facing message, without the call-site suffix carried by `Display`.
    pub fn message(&self) -> &'static str {
        match self {
            SessionError::MissingTitle { .. } => "Please enter a session name",
            SessionError::MissingCode { .. } => "Please enter a session ID",
        }
    }
}

/// Result type alias using [`AuthError`].
pub type Result<T> = std::result::Result<T, AuthError>;
