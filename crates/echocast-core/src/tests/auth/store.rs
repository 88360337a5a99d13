use crate::{
    ACCESS_TOKEN_KEY, AuthToken, CredentialStore, FileCredentialStore, MemoryCredentialStore,
    SessionContext, TOKEN_TYPE_KEY, USER_EMAIL_KEY,
};

use secrecy::ExposeSecret;

/// WHAT: Memory store removes keys and tolerates missing ones
/// WHY: Logout clears keys that may never have been written
#[test]
#[allow(clippy::unwrap_used)]
fn given_memory_store_when_removing_missing_key_then_ok() {
    // Given: An empty store
    let mut store = MemoryCredentialStore::new();

    // When: Writing one key and removing two
    store.set(ACCESS_TOKEN_KEY, "abc").unwrap();
    store.remove(ACCESS_TOKEN_KEY).unwrap();
    let result = store.remove(USER_EMAIL_KEY);

    // Then: Both removals succeed and the store is empty
    assert!(result.is_ok());
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
}

/// WHAT: Token needs both value and scheme to be present
/// WHY: A half-written token cannot build an Authorization header
#[test]
#[allow(clippy::unwrap_used)]
fn given_only_token_value_when_reading_session_then_no_token() {
    // Given: A store holding only the token value
    let mut store = MemoryCredentialStore::new();
    store.set(ACCESS_TOKEN_KEY, "abc").unwrap();
    let session = SessionContext::new(Box::new(store));

    // When/Then: No token is reported
    assert!(session.token().unwrap().is_none());
    assert!(!session.is_authenticated().unwrap());
}

/// WHAT: File store survives being reopened
/// WHY: Credentials outlive the process like browser storage
#[test]
#[allow(clippy::unwrap_used)]
fn given_file_store_when_reopened_then_token_restored() {
    // Given: A session backed by a file in a temp dir
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("credentials.toml");
    let mut session = SessionContext::new(Box::new(FileCredentialStore::open(&path).unwrap()));

    // When: Storing a token and reopening the file
    session.store_token(&AuthToken::new("abc", "bearer")).unwrap();
    session.store_email("a@b.com").unwrap();
    drop(session);
    let reopened = SessionContext::new(Box::new(FileCredentialStore::open(&path).unwrap()));

    // Then: Token and email are read back
    let token = reopened.token().unwrap().unwrap();
    assert_eq!(token.value.expose_secret(), "abc");
    assert_eq!(token.scheme, "bearer");
    assert_eq!(reopened.stored_email().unwrap().as_deref(), Some("a@b.com"));
}

/// WHAT: Clearing a file-backed session empties the file
/// WHY: Logout must not leave a token on disk
#[test]
#[allow(clippy::unwrap_used)]
fn given_file_store_with_token_when_cleared_then_reopen_is_empty() {
    // Given: A persisted token
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.toml");
    let mut session = SessionContext::new(Box::new(FileCredentialStore::open(&path).unwrap()));
    session.store_token(&AuthToken::new("abc", "bearer")).unwrap();

    // When: Clearing and reopening
    session.clear().unwrap();
    let reopened = FileCredentialStore::open(&path).unwrap();

    // Then: No keys survive and no temp file is left behind
    assert_eq!(reopened.get(ACCESS_TOKEN_KEY).unwrap(), None);
    assert_eq!(reopened.get(TOKEN_TYPE_KEY).unwrap(), None);
    assert!(!path.with_extension("toml.tmp").exists());
}

/// WHAT: Corrupt credential file is a storage error
/// WHY: A broken file must not be silently treated as logged out
#[test]
#[allow(clippy::unwrap_used)]
fn given_corrupt_file_when_opening_store_then_storage_error() {
    // Given: A file that is not TOML
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.toml");
    std::fs::write(&path, "this is = = not toml").unwrap();

    // When: Opening it
    let result = FileCredentialStore::open(&path);

    // Then: Storage error
    assert!(matches!(result, Err(crate::AuthError::Storage { .. })));
}

/// WHAT: A failed write leaves the previous token in place
/// WHY: Memory and disk must agree after an I/O error
#[test]
#[allow(clippy::unwrap_used)]
fn given_unwritable_file_when_storing_token_then_previous_token_kept() {
    // Given: A persisted token and a directory squatting on the temp file path
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.toml");
    let mut session = SessionContext::new(Box::new(FileCredentialStore::open(&path).unwrap()));
    session.store_token(&AuthToken::new("old", "bearer")).unwrap();
    std::fs::create_dir(path.with_extension("toml.tmp")).unwrap();

    // When: Storing a replacement token
    let result = session.store_token(&AuthToken::new("new", "mac"));

    // Then: Storage error, and both views still hold the old token
    assert!(matches!(result, Err(crate::AuthError::Storage { .. })));
    let token = session.token().unwrap().unwrap();
    assert_eq!(token.value.expose_secret(), "old");
    assert_eq!(token.scheme, "bearer");
    let reopened = FileCredentialStore::open(&path).unwrap();
    assert_eq!(reopened.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("old"));
    assert_eq!(reopened.get(TOKEN_TYPE_KEY).unwrap().as_deref(), Some("bearer"));
}

/// WHAT: A failed removal keeps the key readable
/// WHY: Logout must not report a cleared session that is still on disk
#[test]
#[allow(clippy::unwrap_used)]
fn given_unwritable_file_when_removing_then_key_still_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.toml");
    let mut store = FileCredentialStore::open(&path).unwrap();
    store.set(USER_EMAIL_KEY, "a@b.com").unwrap();
    std::fs::create_dir(path.with_extension("toml.tmp")).unwrap();

    let result = store.remove(USER_EMAIL_KEY);

    assert!(result.is_err());
    assert_eq!(store.get(USER_EMAIL_KEY).unwrap().as_deref(), Some("a@b.com"));
}
