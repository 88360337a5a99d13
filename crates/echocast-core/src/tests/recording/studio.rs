use crate::{SessionError, SessionOrigin, StudioSession};

/// WHAT: Creating a session trims the title and generates a code
/// WHY: The code is what others use to join
#[test]
#[allow(clippy::unwrap_used)]
fn given_title_when_creating_session_then_code_and_link_generated() {
    // Given/When: A session created with padded title
    let session = StudioSession::create("  Tech Talk Episode 16 ").unwrap();

    // Then: Title trimmed, 8-char code, link built from it
    assert_eq!(session.title(), "Tech Talk Episode 16");
    assert_eq!(session.origin(), SessionOrigin::Created);
    assert_eq!(session.code().len(), 8);
    assert_eq!(
        session.join_link(),
        format!("https://echocast.app/join/{}", session.code())
    );
}

/// WHAT: Blank title is rejected
/// WHY: Sessions need a name
#[test]
fn given_blank_title_when_creating_session_then_missing_title() {
    let result = StudioSession::create("   ");

    assert!(matches!(result, Err(SessionError::MissingTitle { .. })));
}

/// WHAT: Joining keeps the given code
/// WHY: The join link must point at the same session
#[test]
#[allow(clippy::unwrap_used)]
fn given_code_when_joining_session_then_link_uses_code() {
    let session = StudioSession::join(" abc123 ").unwrap();

    assert_eq!(session.code(), "abc123");
    assert_eq!(session.origin(), SessionOrigin::Joined);
    assert_eq!(session.join_link(), "https://echocast.app/join/abc123");
}

/// WHAT: Blank code is rejected
/// WHY: There is nothing to join
#[test]
fn given_blank_code_when_joining_session_then_missing_code() {
    let result = StudioSession::join("");

    assert!(matches!(result, Err(SessionError::MissingCode { .. })));
}
