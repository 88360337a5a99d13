/// Transition reported by the recording controller.
///
/// Controllers return these instead of notifying anyone directly, so the
/// presentation layer decides how (and whether) to surface them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingEvent {
    /// Idle -> Recording.
    Started,
    /// Recording -> Paused.
    Paused {
        /// Elapsed seconds frozen at the pause.
        elapsed_seconds: u64,
    },
    /// Paused -> Recording.
    Resumed {
        /// Elapsed seconds the run continues from.
        elapsed_seconds: u64,
    },
    /// Recording/Paused -> Idle. The counter has already been reset.
    Stopped {
        /// Elapsed seconds at the moment of stopping.
        final_elapsed_seconds: u64,
    },
    /// Local microphone flipped.
    MicToggled {
        /// New microphone state.
        on: bool,
    },
    /// Local camera flipped.
    CameraToggled {
        /// New camera state.
        on: bool,
    },
    /// Local playback mute flipped.
    SpeakerToggled {
        /// New mute state.
        muted: bool,
    },
}
