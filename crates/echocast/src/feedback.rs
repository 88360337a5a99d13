//! User-facing notifications.
//!
//! Turns recording events and command outcomes into short title/description
//! notices and writes them to the console.

use crate::{AppError, AppResult};

use std::io::Write;

use echocast_core::{
    Participant, RecordingEvent, RecordingSessionController, StudioSession, UserProfile,
};
use tracing::{debug, instrument};

/// A single notice shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short headline.
    pub title: String,
    /// One-line detail.
    pub description: String,
    /// Error styling.
    pub destructive: bool,
}

impl Notification {
    /// Informational notice.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            destructive: false,
        }
    }

    /// Error notice.
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
            destructive: true,
        }
    }

    /// Notice for a controller transition or device toggle.
    pub fn for_event(event: RecordingEvent) -> Self {
        match event {
            RecordingEvent::Started => {
                Self::info("Recording Started", "Your session is now being recorded")
            }
            RecordingEvent::Paused { .. } => Self::info("Recording Paused", "Recording is paused"),
            RecordingEvent::Resumed { .. } => {
                Self::info("Recording Resumed", "Recording has resumed")
            }
            RecordingEvent::Stopped {
                final_elapsed_seconds,
            } => Self::info(
                "Recording Stopped",
                format!(
                    "Your recording has been saved successfully ({})",
                    echocast_core::format_elapsed(final_elapsed_seconds)
                ),
            ),
            RecordingEvent::MicToggled { on: true } => {
                Self::info("Microphone On", "Your microphone is now active")
            }
            RecordingEvent::MicToggled { on: false } => {
                Self::info("Microphone Off", "Your microphone is now muted")
            }
            RecordingEvent::CameraToggled { on: true } => {
                Self::info("Camera On", "Your camera is now on")
            }
            RecordingEvent::CameraToggled { on: false } => {
                Self::info("Camera Off", "Your camera is now off")
            }
            RecordingEvent::SpeakerToggled { muted: true } => {
                Self::info("Speaker Muted", "Session audio is muted")
            }
            RecordingEvent::SpeakerToggled { muted: false } => {
                Self::info("Speaker On", "Session audio is playing")
            }
        }
    }

    /// Notice for a freshly created session.
    pub fn session_created(session: &StudioSession) -> Self {
        Self::info(
            "Session Created!",
            format!(
                "\"{}\" is ready for recording. Share {}",
                session.title(),
                session.join_link()
            ),
        )
    }

    /// Notice for joining an existing session.
    pub fn session_joined(session: &StudioSession) -> Self {
        Self::info(
            "Joining Session",
            format!("Connecting to session {}...", session.code()),
        )
    }

    /// Notice for a failed command.
    pub fn from_error(error: &AppError) -> Self {
        Self::error(error.user_message())
    }
}

/// Writes notifications and status panels to an output sink.
pub struct FeedbackHandler<W> {
    pub(crate) out: W,
}

impl<W: Write> FeedbackHandler<W> {
    /// Create a handler writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Print a notification.
    #[instrument(skip(self))]
    pub fn notify(&mut self, notification: &Notification) -> AppResult<()> {
        let marker = if notification.destructive { "!" } else { "*" };
        writeln!(
            self.out,
            "[{}] {}: {}",
            marker, notification.title, notification.description
        )?;
        self.out.flush()?;

        debug!(title = %notification.title, "Notification shown");

        Ok(())
    }

    /// Print a line of plain text.
    pub fn line(&mut self, text: &str) -> AppResult<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    /// Print the signed-in user.
    pub fn profile(&mut self, user: &UserProfile) -> AppResult<()> {
        writeln!(
            self.out,
            "Signed in as {} (id {}, member since {})",
            user.email,
            user.id,
            user.created_at.format("%Y-%m-%d")
        )?;
        self.out.flush()?;
        Ok(())
    }

    /// Print the recording panel: status, timer, and participant tiles.
    pub fn status(&mut self, studio: &RecordingSessionController) -> AppResult<()> {
        writeln!(
            self.out,
            "{} [{}] {} | speaker {}",
            studio.title(),
            studio.status(),
            studio.formatted_elapsed(),
            if studio.speaker_muted() { "muted" } else { "on" }
        )?;
        for participant in studio.participants() {
            writeln!(self.out, "  {}", tile(participant))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

fn tile(participant: &Participant) -> String {
    format!(
        "({}) {}{} mic:{} cam:{}",
        participant.initials(),
        participant.display_name,
        if participant.is_host { " [host]" } else { "" },
        if participant.mic_on { "on" } else { "off" },
        if participant.camera_on { "on" } else { "off" },
    )
}
