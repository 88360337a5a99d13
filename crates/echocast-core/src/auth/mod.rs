mod client;
mod session;
mod store;
mod types;

pub use {
    client::{AuthClient, AuthClientConfig, DEFAULT_BASE_URL},
    session::SessionContext,
    store::{
        ACCESS_TOKEN_KEY, CredentialStore, FileCredentialStore, MemoryCredentialStore,
        TOKEN_TYPE_KEY, USER_EMAIL_KEY,
    },
    types::{AuthToken, Credentials, HealthStatus, SignupForm, UserProfile},
};
