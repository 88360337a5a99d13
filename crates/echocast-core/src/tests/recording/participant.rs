use crate::{Participant, RosterError, Roster};

/// WHAT: Roster with one host is accepted, local first
/// WHY: The local seat must be addressable for toggles
#[test]
#[allow(clippy::unwrap_used)]
fn given_single_host_when_building_roster_then_ok() {
    // Given: A local host and two guests
    let local = Participant::host("1", "You");
    let remotes = vec![
        Participant::guest("2", "Sarah Johnson", true, true),
        Participant::guest("3", "Mike Chen", false, true),
    ];

    // When: Building the roster
    let roster = Roster::new(local, remotes).unwrap();

    // Then: Local first, host resolved, lookups work
    assert_eq!(roster.len(), 3);
    assert_eq!(roster.local().id, "1");
    assert_eq!(roster.host().map(|p| p.id.as_str()), Some("1"));
    assert_eq!(roster.get("3").map(|p| p.mic_on), Some(false));
    assert!(roster.get("4").is_none());
}

/// WHAT: Local guest with a remote host is valid
/// WHY: Joining someone else's session makes the local seat a guest
#[test]
fn given_remote_host_when_building_roster_then_ok() {
    let local = Participant::guest("me", "You", true, true);
    let remotes = vec![Participant::host("h", "Sarah Johnson")];

    let roster = Roster::new(local, remotes);

    assert!(roster.is_ok());
}

/// WHAT: Two hosts are rejected
/// WHY: Exactly one host per session
#[test]
fn given_two_hosts_when_building_roster_then_host_count_error() {
    let result = Roster::new(
        Participant::host("1", "You"),
        vec![Participant::host("2", "Sarah Johnson")],
    );

    assert!(matches!(result, Err(RosterError::HostCount { hosts: 2, .. })));
}

/// WHAT: No host is rejected
/// WHY: Exactly one host per session
#[test]
fn given_no_host_when_building_roster_then_host_count_error() {
    let result = Roster::new(Participant::guest("1", "You", true, true), vec![]);

    assert!(matches!(result, Err(RosterError::HostCount { hosts: 0, .. })));
}

/// WHAT: Duplicate ids are rejected
/// WHY: Ids are unique within a session
#[test]
fn given_duplicate_ids_when_building_roster_then_duplicate_error() {
    let result = Roster::new(
        Participant::host("1", "You"),
        vec![Participant::guest("1", "Mike Chen", true, false)],
    );

    assert!(matches!(result, Err(RosterError::DuplicateId { ref id, .. }) if id == "1"));
}

/// WHAT: Blank display names are rejected
/// WHY: Every tile needs a label
#[test]
fn given_blank_name_when_building_roster_then_invalid_participant() {
    let result = Roster::new(Participant::host("1", "  "), vec![]);

    assert!(matches!(result, Err(RosterError::InvalidParticipant { .. })));
}

/// WHAT: Initials come from each word of the name
/// WHY: Camera-off tiles show initials
#[test]
fn given_display_name_when_computing_initials_then_first_letters() {
    assert_eq!(Participant::guest("2", "Sarah Johnson", true, true).initials(), "SJ");
    assert_eq!(Roster::solo("You").local().initials(), "Y");
}
