//! Identity service calls, run off the main loop.
//!
//! The worker owns the [`AuthClient`] and answers requests one at a time, so
//! login, profile lookups and logout never interleave. Replies travel back to
//! the app loop, which keeps draining ticks while a request is in flight.

use echocast_core::{AuthClient, AuthError, AuthResult, HealthStatus, SignupForm, UserProfile};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument};

/// Pending requests the worker will accept before the app reports it busy.
pub(crate) const AUTH_QUEUE_CAPACITY: usize = 8;

/// Work for the identity worker. Holds secrets, so it has no `Debug`.
pub(crate) enum AuthRequest {
    Signup(SignupForm),
    Login { email: String, password: String },
    Me,
    Logout,
    Health,
}

impl AuthRequest {
    /// Loggable name without credentials.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            AuthRequest::Signup(_) => "signup",
            AuthRequest::Login { .. } => "login",
            AuthRequest::Me => "me",
            AuthRequest::Logout => "logout",
            AuthRequest::Health => "health",
        }
    }
}

/// Result of one request, delivered back to the app loop.
#[derive(Debug)]
pub(crate) enum AuthReply {
    SignedUp(AuthResult<UserProfile>),
    LoginFailed(AuthError),
    /// Token stored; the profile lookup that follows may still fail.
    LoggedIn { profile: AuthResult<UserProfile> },
    Profile(AuthResult<UserProfile>),
    LoggedOut(AuthResult<()>),
    Health {
        base_url: String,
        status: AuthResult<HealthStatus>,
    },
}

/// App-side ends of the worker's channels.
pub(crate) struct AuthChannel {
    pub(crate) request_tx: mpsc::Sender<AuthRequest>,
    pub(crate) reply_rx: mpsc::Receiver<AuthReply>,
}

/// Task owning the identity client.
pub(crate) struct AuthWorker {
    auth: AuthClient,
    request_rx: mpsc::Receiver<AuthRequest>,
    reply_tx: mpsc::Sender<AuthReply>,
}

impl AuthWorker {
    /// Wrap `auth` and return the worker with the app's channel ends.
    pub(crate) fn new(auth: AuthClient) -> (Self, AuthChannel) {
        let (request_tx, request_rx) = mpsc::channel(AUTH_QUEUE_CAPACITY);
        let (reply_tx, reply_rx) = mpsc::channel(AUTH_QUEUE_CAPACITY);

        let worker = Self {
            auth,
            request_rx,
            reply_tx,
        };

        (
            worker,
            AuthChannel {
                request_tx,
                reply_rx,
            },
        )
    }

    /// Serve requests until shutdown, or until the app drops its sender or
    /// stops listening. Shutdown abandons a request still in flight.
    #[instrument(skip(self, shutdown_rx), fields(base_url = %self.auth.base_url()))]
    pub(crate) async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) {
        info!("Identity worker started");

        loop {
            let request = tokio::select! {
                _ = shutdown_rx.changed() => break,
                request = self.request_rx.recv() => match request {
                    Some(request) => request,
                    None => break,
                },
            };

            let name = request.name();
            let reply = tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!(request = name, "Shutdown during request, abandoning it");
                    break;
                }
                reply = self.handle(request) => reply,
            };

            if self.reply_tx.send(reply).await.is_err() {
                debug!(request = name, "App loop gone, dropping reply");
                break;
            }
        }

        info!("Identity worker stopped");
    }

    #[instrument(skip(self, request), fields(request = request.name()))]
    async fn handle(&mut self, request: AuthRequest) -> AuthReply {
        match request {
            AuthRequest::Signup(form) => AuthReply::SignedUp(self.auth.signup_form(form).await),
            AuthRequest::Login { email, password } => {
                match self.auth.login(&email, &password).await {
                    Ok(_) => AuthReply::LoggedIn {
                        profile: self.auth.get_current_user().await,
                    },
                    Err(e) => AuthReply::LoginFailed(e),
                }
            }
            AuthRequest::Me => AuthReply::Profile(self.auth.get_current_user().await),
            AuthRequest::Logout => AuthReply::LoggedOut(self.auth.logout()),
            AuthRequest::Health => AuthReply::Health {
                base_url: self.auth.base_url().to_string(),
                status: self.auth.health_check().await,
            },
        }
    }
}
