//! Recording state machine with elapsed-time and roster tracking.
//!
//! Transitions never fail. An action that does not apply to the current
//! status is absorbed and reported as `None`. The controller owns its tick
//! source: it is armed on entering `Recording` and released on pause, stop,
//! and drop.

use crate::recording::{
    IntervalTicker, Participant, RecordingEvent, RecordingStatus, Roster, Tick, TickHandle,
    format_elapsed,
};

use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Drives one recording session.
#[derive(Debug)]
pub struct RecordingSessionController {
    session_id: Uuid,
    title: String,
    status: RecordingStatus,
    elapsed_seconds: u64,
    roster: Roster,
    speaker_muted: bool,
    ticker: Option<IntervalTicker>,
    armed: Option<TickHandle>,
    epoch: u64,
}

impl RecordingSessionController {
    /// Idle controller driven by explicit [`tick`](Self::tick) calls.
    pub fn new(title: impl Into<String>, roster: Roster) -> Self {
        let session_id = Uuid::new_v4();
        let title = title.into();

        info!(session_id = %session_id, title = %title, participants = roster.len(), "Recording session opened");

        Self {
            session_id,
            title,
            status: RecordingStatus::Idle,
            elapsed_seconds: 0,
            roster,
            speaker_muted: false,
            ticker: None,
            armed: None,
            epoch: 0,
        }
    }

    /// Attach a periodic tick source, armed while recording.
    pub fn with_ticker(mut self, ticker: IntervalTicker) -> Self {
        self.ticker = Some(ticker);
        self
    }

    /// Idle -> Recording. Ignored in any other state.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn start(&mut self) -> Option<RecordingEvent> {
        if self.status != RecordingStatus::Idle {
            debug!(status = %self.status, "Start ignored");
            return None;
        }

        self.elapsed_seconds = 0;
        self.status = RecordingStatus::Recording;
        self.arm();

        info!("Recording started");

        Some(RecordingEvent::Started)
    }

    /// Toggle Recording <-> Paused. Ignored while idle.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn pause(&mut self) -> Option<RecordingEvent> {
        match self.status {
            RecordingStatus::Idle => {
                debug!("Pause ignored while idle");
                None
            }
            RecordingStatus::Recording => {
                self.disarm();
                self.status = RecordingStatus::Paused;

                info!(elapsed_seconds = self.elapsed_seconds, "Recording paused");

                Some(RecordingEvent::Paused {
                    elapsed_seconds: self.elapsed_seconds,
                })
            }
            RecordingStatus::Paused => {
                self.status = RecordingStatus::Recording;
                self.arm();

                info!(elapsed_seconds = self.elapsed_seconds, "Recording resumed");

                Some(RecordingEvent::Resumed {
                    elapsed_seconds: self.elapsed_seconds,
                })
            }
        }
    }

    /// Paused -> Recording. Ignored in any other state.
    pub fn resume(&mut self) -> Option<RecordingEvent> {
        if self.status == RecordingStatus::Paused {
            self.pause()
        } else {
            None
        }
    }

    /// Recording/Paused -> Idle, resetting the counter.
    ///
    /// The returned event carries the elapsed time of the finished run.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn stop(&mut self) -> Option<RecordingEvent> {
        if self.status == RecordingStatus::Idle {
            debug!("Stop ignored while idle");
            return None;
        }

        self.disarm();
        let final_elapsed_seconds = self.elapsed_seconds;
        self.elapsed_seconds = 0;
        self.status = RecordingStatus::Idle;

        info!(
            duration = %format_elapsed(final_elapsed_seconds),
            elapsed_seconds = final_elapsed_seconds,
            "Recording stopped"
        );

        Some(RecordingEvent::Stopped {
            final_elapsed_seconds,
        })
    }

    /// Advance the counter by one second if recording. Returns whether it moved.
    pub fn tick(&mut self) -> bool {
        if self.status != RecordingStatus::Recording {
            return false;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        true
    }

    /// Apply a tick from the armed source.
    ///
    /// Ticks from another session, or armed before the latest transition,
    /// are dropped.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        if tick.session_id != self.session_id || tick.epoch != self.epoch {
            debug!(
                session_id = %self.session_id,
                tick_epoch = tick.epoch,
                current_epoch = self.epoch,
                "Stale tick discarded"
            );
            return false;
        }
        self.tick()
    }

    /// Flip the local microphone. Allowed in every state.
    pub fn toggle_mic(&mut self) -> RecordingEvent {
        let local = self.roster.local_mut();
        local.mic_on = !local.mic_on;
        let on = local.mic_on;

        debug!(session_id = %self.session_id, mic_on = on, "Microphone toggled");

        RecordingEvent::MicToggled { on }
    }

    /// Flip the local camera. Allowed in every state.
    pub fn toggle_camera(&mut self) -> RecordingEvent {
        let local = self.roster.local_mut();
        local.camera_on = !local.camera_on;
        let on = local.camera_on;

        debug!(session_id = %self.session_id, camera_on = on, "Camera toggled");

        RecordingEvent::CameraToggled { on }
    }

    /// Flip local playback mute.
    pub fn toggle_speaker(&mut self) -> RecordingEvent {
        self.speaker_muted = !self.speaker_muted;

        debug!(session_id = %self.session_id, muted = self.speaker_muted, "Speaker toggled");

        RecordingEvent::SpeakerToggled {
            muted: self.speaker_muted,
        }
    }

    /// Current status.
    pub fn status(&self) -> RecordingStatus {
        self.status
    }

    /// Seconds recorded in the current run.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Elapsed time as `MM:SS`.
    pub fn formatted_elapsed(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    /// Session id used for log correlation and tick routing.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Session title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All participants, local first.
    pub fn participants(&self) -> &[Participant] {
        self.roster.participants()
    }

    /// The local participant.
    pub fn local_participant(&self) -> &Participant {
        self.roster.local()
    }

    /// Number of participants.
    pub fn participant_count(&self) -> usize {
        self.roster.len()
    }

    /// Local playback mute.
    pub fn speaker_muted(&self) -> bool {
        self.speaker_muted
    }

    /// Whether a tick task is armed and still running.
    pub fn is_ticking(&self) -> bool {
        self.armed.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Arming generation; bumps on every arm and disarm.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn arm(&mut self) {
        self.epoch += 1;
        let tick = Tick {
            session_id: self.session_id,
            epoch: self.epoch,
        };
        self.armed = self.ticker.as_ref().and_then(|ticker| ticker.arm(tick));
    }

    fn disarm(&mut self) {
        self.epoch += 1;
        // Dropping the handle aborts the task.
        self.armed = None;
    }
}
