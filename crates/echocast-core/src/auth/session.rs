use crate::{
    AuthResult,
    auth::{
        AuthToken, CredentialStore, MemoryCredentialStore,
        store::{ACCESS_TOKEN_KEY, TOKEN_TYPE_KEY, USER_EMAIL_KEY},
    },
};

use secrecy::ExposeSecret;
use tracing::{debug, info};

/// Owns the credentials of one signed-in identity.
///
/// Holds at most one token; storing a new one replaces the previous.
pub struct SessionContext {
    store: Box<dyn CredentialStore>,
}

impl SessionContext {
    /// Wrap an existing store. Whatever it already holds is the current session.
    pub fn new(store: Box<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Session backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryCredentialStore::new()))
    }

    /// Currently stored token, if both its value and scheme are present.
    pub fn token(&self) -> AuthResult<Option<AuthToken>> {
        let value = self.store.get(ACCESS_TOKEN_KEY)?;
        let scheme = self.store.get(TOKEN_TYPE_KEY)?;

        Ok(match (value, scheme) {
            (Some(value), Some(scheme)) => Some(AuthToken::new(value, scheme)),
            _ => None,
        })
    }

    /// Replace the stored token.
    pub fn store_token(&mut self, token: &AuthToken) -> AuthResult<()> {
        self.store.set_many(&[
            (ACCESS_TOKEN_KEY, token.value.expose_secret().as_str()),
            (TOKEN_TYPE_KEY, token.scheme.as_str()),
        ])?;

        debug!(scheme = %token.scheme, "Access token stored");

        Ok(())
    }

    /// Email of the last profile resolved in this session.
    pub fn stored_email(&self) -> AuthResult<Option<String>> {
        self.store.get(USER_EMAIL_KEY)
    }

    /// Remember the email of the resolved profile.
    pub fn store_email(&mut self, email: &str) -> AuthResult<()> {
        self.store.set(USER_EMAIL_KEY, email)
    }

    /// Whether a token is currently held.
    pub fn is_authenticated(&self) -> AuthResult<bool> {
        Ok(self.token()?.is_some())
    }

    /// Drop every stored credential.
    pub fn clear(&mut self) -> AuthResult<()> {
        self.store.remove(ACCESS_TOKEN_KEY)?;
        self.store.remove(TOKEN_TYPE_KEY)?;
        self.store.remove(USER_EMAIL_KEY)?;

        info!("Session credentials cleared");

        Ok(())
    }

    /// Raw value for `key`, for callers that inspect the persisted layout.
    pub fn raw(&self, key: &str) -> AuthResult<Option<String>> {
        self.store.get(key)
    }
}
