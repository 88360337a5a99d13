use crate::SessionError;

use std::panic::Location;

use error_location::ErrorLocation;
use uuid::Uuid;

/// Prefix of shareable join links.
pub const JOIN_LINK_BASE: &str = "https://echocast.app/join";

/// How the local user arrived in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Created locally from a title.
    Created,
    /// Joined with a code someone shared.
    Joined,
}

/// A session the user is about to record in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioSession {
    code: String,
    title: String,
    origin: SessionOrigin,
}

impl StudioSession {
    /// New session with a generated code.
    #[track_caller]
    pub fn create(title: &str) -> Result<Self, SessionError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SessionError::MissingTitle {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut code = Uuid::new_v4().simple().to_string();
        code.truncate(8);

        Ok(Self {
            code,
            title: title.to_string(),
            origin: SessionOrigin::Created,
        })
    }

    /// Existing session identified by `code`.
    #[track_caller]
    pub fn join(code: &str) -> Result<Self, SessionError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(SessionError::MissingCode {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            code: code.to_string(),
            title: format!("Session {}", code),
            origin: SessionOrigin::Joined,
        })
    }

    /// Code others use to join.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Session title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// How the session was entered.
    pub fn origin(&self) -> SessionOrigin {
        self.origin
    }

    /// Shareable link, `https://echocast.app/join/<code>`.
    pub fn join_link(&self) -> String {
        format!("{}/{}", JOIN_LINK_BASE, self.code)
    }
}
