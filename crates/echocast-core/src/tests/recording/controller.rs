use crate::{
    LOCAL_PARTICIPANT_ID, Participant, RecordingEvent, RecordingSessionController,
    RecordingStatus, Roster, Tick,
};

use uuid::Uuid;

#[allow(clippy::unwrap_used)]
fn studio() -> RecordingSessionController {
    let roster = Roster::new(
        Participant::host(LOCAL_PARTICIPANT_ID, "You"),
        vec![
            Participant::guest("2", "Sarah Johnson", true, true),
            Participant::guest("3", "Mike Chen", false, true),
        ],
    )
    .unwrap();
    RecordingSessionController::new("Tech Talk Episode 16", roster)
}

fn recording_for(seconds: u64) -> RecordingSessionController {
    let mut controller = studio();
    controller.start();
    for _ in 0..seconds {
        controller.tick();
    }
    controller
}

/// WHAT: New controller is idle at zero
/// WHY: Idle entry action clears the counter
#[test]
fn given_new_controller_when_inspecting_then_idle_at_zero() {
    let controller = studio();

    assert_eq!(controller.status(), RecordingStatus::Idle);
    assert_eq!(controller.elapsed_seconds(), 0);
    assert_eq!(controller.formatted_elapsed(), "00:00");
    assert_eq!(controller.participant_count(), 3);
    assert_eq!(controller.title(), "Tech Talk Episode 16");
}

/// WHAT: Each tick while recording adds exactly one second
/// WHY: Elapsed time must be monotonic and exact
#[test]
fn given_recording_when_ticking_then_elapsed_increases_by_one_per_tick() {
    // Given: A started recording
    let mut controller = studio();
    assert_eq!(controller.start(), Some(RecordingEvent::Started));

    // When/Then: Every tick advances by one
    for expected in 1..=5 {
        assert!(controller.tick());
        assert_eq!(controller.elapsed_seconds(), expected);
    }
}

/// WHAT: Ticks while paused do nothing
/// WHY: Pausing freezes the counter
#[test]
fn given_paused_when_ticking_then_elapsed_frozen() {
    // Given: Paused after 3 seconds
    let mut controller = recording_for(3);
    assert_eq!(
        controller.pause(),
        Some(RecordingEvent::Paused { elapsed_seconds: 3 })
    );

    // When: Ticking repeatedly
    for _ in 0..10 {
        assert!(!controller.tick());
    }

    // Then: Still 3
    assert_eq!(controller.elapsed_seconds(), 3);
    assert_eq!(controller.status(), RecordingStatus::Paused);
}

/// WHAT: Pause and tick are ignored while idle
/// WHY: Misuse is absorbed, never raised
#[test]
fn given_idle_when_pausing_or_ticking_then_nothing_changes() {
    let mut controller = studio();

    assert_eq!(controller.pause(), None);
    assert!(!controller.tick());
    assert_eq!(controller.resume(), None);
    assert_eq!(controller.stop(), None);

    assert_eq!(controller.status(), RecordingStatus::Idle);
    assert_eq!(controller.elapsed_seconds(), 0);
}

/// WHAT: Pausing twice returns to recording with elapsed unchanged
/// WHY: Pause is a toggle
#[test]
fn given_recording_when_pausing_twice_then_recording_with_same_elapsed() {
    // Given: Recording at 4 seconds
    let mut controller = recording_for(4);

    // When: Toggling twice
    controller.pause();
    let event = controller.pause();

    // Then: Resumed at 4
    assert_eq!(event, Some(RecordingEvent::Resumed { elapsed_seconds: 4 }));
    assert_eq!(controller.status(), RecordingStatus::Recording);
    assert_eq!(controller.elapsed_seconds(), 4);

    // And ticking continues from there
    controller.tick();
    assert_eq!(controller.elapsed_seconds(), 5);
}

/// WHAT: Resume only acts from paused
/// WHY: Resume must not pause a running recording
#[test]
fn given_recording_when_resuming_then_ignored() {
    let mut controller = recording_for(2);

    assert_eq!(controller.resume(), None);
    assert_eq!(controller.status(), RecordingStatus::Recording);

    controller.pause();
    assert_eq!(
        controller.resume(),
        Some(RecordingEvent::Resumed { elapsed_seconds: 2 })
    );
}

/// WHAT: Stop from recording or paused resets to idle at zero
/// WHY: Stop is a destructive reset
#[test]
fn given_any_active_state_when_stopping_then_idle_at_zero() {
    // Given: One controller recording, one paused
    let mut recording = recording_for(42);
    let mut paused = recording_for(7);
    paused.pause();

    // When: Stopping both
    let recording_event = recording.stop();
    let paused_event = paused.stop();

    // Then: Both idle at zero, events carry the final durations
    assert_eq!(
        recording_event,
        Some(RecordingEvent::Stopped {
            final_elapsed_seconds: 42
        })
    );
    assert_eq!(
        paused_event,
        Some(RecordingEvent::Stopped {
            final_elapsed_seconds: 7
        })
    );
    for controller in [&recording, &paused] {
        assert_eq!(controller.status(), RecordingStatus::Idle);
        assert_eq!(controller.elapsed_seconds(), 0);
    }
}

/// WHAT: Start while active is ignored
/// WHY: Re-arming would double-count time
#[test]
fn given_recording_or_paused_when_starting_again_then_ignored() {
    let mut controller = recording_for(5);
    assert_eq!(controller.start(), None);
    assert_eq!(controller.elapsed_seconds(), 5);

    controller.pause();
    assert_eq!(controller.start(), None);
    assert_eq!(controller.status(), RecordingStatus::Paused);
    assert_eq!(controller.elapsed_seconds(), 5);
}

/// WHAT: A new run after stop starts from zero
/// WHY: Each recording session run is independent
#[test]
fn given_stopped_run_when_starting_again_then_counts_from_zero() {
    let mut controller = recording_for(9);
    controller.stop();

    controller.start();
    controller.tick();

    assert_eq!(controller.elapsed_seconds(), 1);
}

/// WHAT: Mic toggle flips only the local microphone
/// WHY: Camera and remote seats are independent of the local mic
#[test]
fn given_roster_when_toggling_mic_then_only_local_mic_changes() {
    // Given: Snapshot of the roster
    let mut controller = studio();
    let before = controller.participants().to_vec();

    // When: Toggling the mic
    let event = controller.toggle_mic();

    // Then: Local mic off, everything else untouched
    assert_eq!(event, RecordingEvent::MicToggled { on: false });
    let after = controller.participants();
    assert!(!after[0].mic_on);
    assert_eq!(after[0].camera_on, before[0].camera_on);
    assert_eq!(&after[1..], &before[1..]);
}

/// WHAT: Camera toggle flips only the local camera
/// WHY: Toggles are independent and local
#[test]
fn given_roster_when_toggling_camera_twice_then_restored() {
    let mut controller = studio();

    assert_eq!(
        controller.toggle_camera(),
        RecordingEvent::CameraToggled { on: false }
    );
    assert!(controller.local_participant().mic_on);
    assert_eq!(
        controller.toggle_camera(),
        RecordingEvent::CameraToggled { on: true }
    );
    assert!(controller.local_participant().camera_on);
}

/// WHAT: Device toggles work in every recording state
/// WHY: Toggles are always permitted
#[test]
fn given_recording_when_toggling_devices_then_status_and_elapsed_unchanged() {
    let mut controller = recording_for(3);

    controller.toggle_mic();
    controller.toggle_camera();
    let event = controller.toggle_speaker();

    assert_eq!(event, RecordingEvent::SpeakerToggled { muted: true });
    assert!(controller.speaker_muted());
    assert_eq!(controller.status(), RecordingStatus::Recording);
    assert_eq!(controller.elapsed_seconds(), 3);
}

/// WHAT: Ticks armed before a pause are discarded after resume
/// WHY: A queued tick from an earlier run must not count
#[test]
fn given_tick_from_previous_arming_when_applied_then_discarded() {
    // Given: A recording whose first arming is captured
    let mut controller = studio();
    controller.start();
    let stale = Tick {
        session_id: controller.session_id(),
        epoch: controller.epoch(),
    };

    // When: Pausing, resuming, then delivering the old tick
    controller.pause();
    controller.pause();
    let counted = controller.on_tick(stale);

    // Then: Ignored
    assert!(!counted);
    assert_eq!(controller.elapsed_seconds(), 0);

    // And a tick from the current arming counts
    let fresh = Tick {
        session_id: controller.session_id(),
        epoch: controller.epoch(),
    };
    assert!(controller.on_tick(fresh));
    assert_eq!(controller.elapsed_seconds(), 1);
}

/// WHAT: Ticks addressed to another session are ignored
/// WHY: A replaced controller's ticks must not leak into the new one
#[test]
fn given_tick_for_other_session_when_applied_then_discarded() {
    let mut controller = recording_for(0);

    let foreign = Tick {
        session_id: Uuid::new_v4(),
        epoch: controller.epoch(),
    };

    assert!(!controller.on_tick(foreign));
    assert_eq!(controller.elapsed_seconds(), 0);
}

/// WHAT: Stop invalidates the current arming
/// WHY: No tick is observed after a stop
#[test]
fn given_tick_armed_before_stop_when_applied_after_restart_then_discarded() {
    let mut controller = recording_for(0);
    let before_stop = Tick {
        session_id: controller.session_id(),
        epoch: controller.epoch(),
    };

    controller.stop();
    controller.start();

    assert!(!controller.on_tick(before_stop));
    assert_eq!(controller.elapsed_seconds(), 0);
}
