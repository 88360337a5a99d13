use echocast_core::{AuthError, RosterError, SessionError};

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the echocast binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// Identity service or credential storage error from echocast-core.
    #[error("Auth error: {source} {location}")]
    Auth {
        /// The underlying auth error.
        #[source]
        source: AuthError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configured participants do not form a valid roster.
    #[error("Roster error: {source} {location}")]
    Roster {
        /// The underlying roster error.
        #[source]
        source: RosterError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Session could not be created or joined.
    #[error("Session error: {source} {location}")]
    Session {
        /// The underlying session error.
        #[source]
        source: SessionError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// A recording command arrived before any session was created or joined.
    #[error("No active session {location}")]
    NoActiveSession {
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Input line could not be parsed into a command.
    #[error("Invalid command: {reason} {location}")]
    InvalidCommand {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Failed to send message through async channel.
    #[error("Channel send failed: {message} {location}")]
    ChannelSendFailed {
        /// Human-readable error message.
        message: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from terminal or filesystem operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

impl AppError {
    /// Message suitable for showing to the user, without the call-site suffix.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Auth { source, .. } => source.message(),
            AppError::Session { source, .. } => source.message().to_string(),
            AppError::NoActiveSession { .. } => {
                "No active session. Use `create <title>` or `join <code>` first".to_string()
            }
            AppError::InvalidCommand { reason, .. } | AppError::ConfigError { reason, .. } => {
                reason.clone()
            }
            AppError::ChannelSendFailed { message, .. } => message.clone(),
            AppError::Roster { source, .. } => source.to_string(),
            AppError::IoError { source, .. } => source.to_string(),
        }
    }
}

// Manual From impls with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<AuthError> for AppError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        AppError::Auth {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<RosterError> for AppError {
    #[track_caller]
    fn from(source: RosterError) -> Self {
        AppError::Roster {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<SessionError> for AppError {
    #[track_caller]
    fn from(source: SessionError) -> Self {
        AppError::Session {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
