use crate::RosterError;

use std::{collections::HashSet, panic::Location};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Id given to the local participant by [`Roster::solo`].
pub const LOCAL_PARTICIPANT_ID: &str = "local";

/// One seat in a recording session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique within the session.
    pub id: String,
    /// Name shown on the participant's tile.
    pub display_name: String,
    /// Whether this participant hosts the session.
    pub is_host: bool,
    /// Microphone live.
    pub mic_on: bool,
    /// Camera live.
    pub camera_on: bool,
}

impl Participant {
    /// Host seat with microphone and camera on.
    pub fn host(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            is_host: true,
            mic_on: true,
            camera_on: true,
        }
    }

    /// Non-host seat with the given device state.
    pub fn guest(
        id: impl Into<String>,
        display_name: impl Into<String>,
        mic_on: bool,
        camera_on: bool,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            is_host: false,
            mic_on,
            camera_on,
        }
    }

    /// First letter of each word of the display name, e.g. `SJ`.
    pub fn initials(&self) -> String {
        self.display_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

/// Fixed membership of a session.
///
/// Exactly one host and exactly one local participant. Only the local
/// participant's flags can change; remote seats are display-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
    local_index: usize,
}

impl Roster {
    /// Build a roster from the local seat and the remote seats.
    #[track_caller]
    pub fn new(local: Participant, remotes: Vec<Participant>) -> Result<Self, RosterError> {
        let mut participants = Vec::with_capacity(remotes.len() + 1);
        participants.push(local);
        participants.extend(remotes);

        let mut seen = HashSet::new();
        for p in &participants {
            if p.id.trim().is_empty() {
                return Err(RosterError::InvalidParticipant {
                    reason: "participant id is blank".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            if p.display_name.trim().is_empty() {
                return Err(RosterError::InvalidParticipant {
                    reason: format!("participant {} has no display name", p.id),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            if !seen.insert(p.id.as_str()) {
                return Err(RosterError::DuplicateId {
                    id: p.id.clone(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        let hosts = participants.iter().filter(|p| p.is_host).count();
        if hosts != 1 {
            return Err(RosterError::HostCount {
                hosts,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            participants,
            local_index: 0,
        })
    }

    /// Roster holding only the local participant, as host.
    pub fn solo(display_name: impl Into<String>) -> Self {
        Self {
            participants: vec![Participant::host(LOCAL_PARTICIPANT_ID, display_name)],
            local_index: 0,
        }
    }

    /// All seats, local first.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// The local participant.
    pub fn local(&self) -> &Participant {
        &self.participants[self.local_index]
    }

    pub(crate) fn local_mut(&mut self) -> &mut Participant {
        &mut self.participants[self.local_index]
    }

    /// The session host.
    pub fn host(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_host)
    }

    /// Look up a seat by id.
    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Number of seats.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Always false: a roster holds at least the local seat.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
