use std::fmt;

/// Resting states of the recording state machine.
///
/// Stopping is a transition back to [`RecordingStatus::Idle`], reported
/// through [`crate::RecordingEvent::Stopped`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordingStatus {
    /// Nothing recording; elapsed time is zero.
    #[default]
    Idle,
    /// Recording; elapsed time advances on every tick.
    Recording,
    /// Recording suspended; elapsed time is frozen.
    Paused,
}

impl fmt::Display for RecordingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordingStatus::Idle => "idle",
            RecordingStatus::Recording => "recording",
            RecordingStatus::Paused => "paused",
        };
        f.write_str(label)
    }
}
