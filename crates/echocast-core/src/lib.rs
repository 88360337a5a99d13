//! EchoCast Core Library
//!
//! Session state for the EchoCast recording studio: the identity-service
//! client with its credential storage, and the recording state machine
//! with its timer and participant roster.
//!
//! # Example
//!
//! ```no_run
//! use echocast_core::{
//!     AuthClient, AuthClientConfig, AuthResult, RecordingSessionController, Roster,
//!     SessionContext,
//! };
//!
//! # async fn run() -> AuthResult<()> {
//! let mut client = AuthClient::new(AuthClientConfig::default(), SessionContext::in_memory())?;
//! client.login("host@example.com", "hunter2").await?;
//! let me = client.get_current_user().await?;
//!
//! let mut studio = RecordingSessionController::new("Tech Talk", Roster::solo(me.email));
//! studio.start();
//! studio.tick();
//! assert_eq!(studio.formatted_elapsed(), "00:01");
//! # Ok(())
//! # }
//! ```

mod atomic_file;
mod auth;
mod error;
mod recording;

pub use {
    atomic_file::write_atomic,
    auth::{
        ACCESS_TOKEN_KEY, AuthClient, AuthClientConfig, AuthToken, CredentialStore, Credentials,
        DEFAULT_BASE_URL, FileCredentialStore, HealthStatus, MemoryCredentialStore,
        SessionContext, SignupForm, TOKEN_TYPE_KEY, USER_EMAIL_KEY, UserProfile,
    },
    error::{AuthError, AuthErrorKind, Result as AuthResult, RosterError, SessionError},
    recording::{
        DEFAULT_TICK_INTERVAL, IntervalTicker, JOIN_LINK_BASE, LOCAL_PARTICIPANT_ID,
        MIN_TICK_INTERVAL, Participant, RecordingEvent, RecordingSessionController,
        RecordingStatus, Roster, SessionOrigin, StudioSession, Tick, TickHandle, format_elapsed,
    },
};

#[cfg(test)]
mod tests;
