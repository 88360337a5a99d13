use crate::config::{default_device_on, default_display_name, default_tick_interval_ms};

use std::time::Duration;

use echocast_core::{LOCAL_PARTICIPANT_ID, Participant, Roster, RosterError};
use serde::{Deserialize, Serialize};

/// Recording studio configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Name shown on the local participant's tile.
    #[serde(default = "default_display_name")]
    pub display_name: String,

    /// Timer period in milliseconds. Values below one are raised to one.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Other seats in every session. Display-only.
    #[serde(default)]
    pub remote_participants: Vec<RemoteParticipantConfig>,
}

/// A remote seat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteParticipantConfig {
    /// Unique participant id.
    pub id: String,
    /// Name shown on the tile.
    pub display_name: String,
    /// Whether this seat hosts; the local seat hosts otherwise.
    #[serde(default)]
    pub is_host: bool,
    /// Microphone live.
    #[serde(default = "default_device_on")]
    pub mic_on: bool,
    /// Camera live.
    #[serde(default = "default_device_on")]
    pub camera_on: bool,
}

impl StudioConfig {
    pub(crate) fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Build the session roster. The local seat hosts unless a remote seat does.
    #[track_caller]
    pub(crate) fn roster(&self) -> Result<Roster, RosterError> {
        let remote_host = self.remote_participants.iter().any(|r| r.is_host);

        let local = if remote_host {
            Participant::guest(LOCAL_PARTICIPANT_ID, self.display_name.clone(), true, true)
        } else {
            Participant::host(LOCAL_PARTICIPANT_ID, self.display_name.clone())
        };

        let remotes = self
            .remote_participants
            .iter()
            .map(|r| Participant {
                id: r.id.clone(),
                display_name: r.display_name.clone(),
                is_host: r.is_host,
                mic_on: r.mic_on,
                camera_on: r.camera_on,
            })
            .collect();

        Roster::new(local, remotes)
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
            tick_interval_ms: default_tick_interval_ms(),
            remote_participants: Vec::new(),
        }
    }
}
