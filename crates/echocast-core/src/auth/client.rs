use crate::{
    AuthError, AuthResult,
    auth::{
        AuthToken, Credentials, HealthStatus, SessionContext, SignupForm, UserProfile,
        types::{LoginRequest, SignupRequest, TokenResponse, detail_or, validate_non_blank},
    },
    error::{LOGIN_FAILED, SIGNUP_FAILED},
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use reqwest::header::AUTHORIZATION;
use secrecy::ExposeSecret;
use tracing::{debug, info, instrument, warn};

/// Default identity service location.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const SIGNUP_PATH: &str = "/auth/signup";
const LOGIN_PATH: &str = "/auth/login";
const ME_PATH: &str = "/auth/me";
const HEALTH_PATH: &str = "/health";

/// Connection settings for [`AuthClient`].
#[derive(Debug, Clone)]
pub struct AuthClientConfig {
    /// Identity service base URL, without trailing path.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for AuthClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("echocast/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Client for the identity service.
///
/// Every call makes exactly one request. Nothing is retried; failures are
/// returned to the caller as an [`AuthError`] for display.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl AuthClient {
    /// Build a client bound to `session`.
    #[track_caller]
    pub fn new(config: AuthClientConfig, session: SessionContext) -> AuthResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Credentials held by this client.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register a new account. Does not sign in.
    #[instrument(skip(self, password))]
    pub async fn signup(&self, email: &str, password: &str) -> AuthResult<UserProfile> {
        validate_non_blank(email, password)?;

        let response = self
            .http
            .post(self.url(SIGNUP_PATH))
            .json(&SignupRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = detail_or(&body, SIGNUP_FAILED);
            warn!(status = status.as_u16(), detail = %detail, "Signup rejected");
            return Err(AuthError::SignupRejected {
                detail,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let profile: UserProfile = response.json().await?;

        info!(user_id = profile.id, "Account created");

        Ok(profile)
    }

    /// Validate a signup form locally, then register it.
    ///
    /// A password confirmation mismatch fails here without any request.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn signup_form(&self, form: SignupForm) -> AuthResult<UserProfile> {
        form.validate()?;
        self.signup(&form.email, form.password.expose_secret()).await
    }

    /// Exchange credentials for a token and store it in the session.
    #[instrument(skip(self, secret))]
    pub async fn login(&mut self, identifier: &str, secret: &str) -> AuthResult<AuthToken> {
        self.login_with(Credentials::new(identifier, secret)).await
    }

    /// Same as [`AuthClient::login`], taking prepared [`Credentials`].
    #[instrument(skip(self, credentials), fields(identifier = %credentials.identifier))]
    pub async fn login_with(&mut self, credentials: Credentials) -> AuthResult<AuthToken> {
        let form = LoginRequest {
            username: &credentials.identifier,
            password: credentials.secret.expose_secret(),
        };

        let response = self.http.post(self.url(LOGIN_PATH)).form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = detail_or(&body, LOGIN_FAILED);
            warn!(status = status.as_u16(), detail = %detail, "Login rejected");
            return Err(AuthError::LoginRejected {
                detail,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let issued: TokenResponse = response.json().await?;
        let token = AuthToken::new(issued.access_token, issued.token_type);

        self.session.store_token(&token)?;

        info!(scheme = %token.scheme, "Logged in");

        Ok(token)
    }

    /// Resolve the profile behind the stored token.
    ///
    /// Without a stored token the request goes out unauthenticated and the
    /// server decides.
    #[instrument(skip(self))]
    pub async fn get_current_user(&mut self) -> AuthResult<UserProfile> {
        let mut request = self.http.get(self.url(ME_PATH));

        match self.session.token()? {
            Some(token) => request = request.header(AUTHORIZATION, token.header_value()),
            None => debug!("No stored token, requesting profile unauthenticated"),
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Profile lookup refused");
            return Err(AuthError::Unauthorized {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let profile: UserProfile = response.json().await?;
        self.session.store_email(&profile.email)?;

        debug!(user_id = profile.id, "Profile resolved");

        Ok(profile)
    }

    /// Unauthenticated liveness check. The status code is not inspected.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> AuthResult<HealthStatus> {
        let health: HealthStatus = self
            .http
            .get(self.url(HEALTH_PATH))
            .send()
            .await?
            .json()
            .await?;

        debug!(status = %health.status, "Health check");

        Ok(health)
    }

    /// Forget the stored token and profile email.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> AuthResult<()> {
        self.session.clear()
    }
}
