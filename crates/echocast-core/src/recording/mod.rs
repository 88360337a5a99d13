mod controller;
mod event;
mod format;
mod participant;
mod status;
mod studio;
mod ticker;

pub use {
    controller::RecordingSessionController,
    event::RecordingEvent,
    format::format_elapsed,
    participant::{LOCAL_PARTICIPANT_ID, Participant, Roster},
    status::RecordingStatus,
    studio::{JOIN_LINK_BASE, SessionOrigin, StudioSession},
    ticker::{DEFAULT_TICK_INTERVAL, IntervalTicker, MIN_TICK_INTERVAL, Tick, TickHandle},
};
