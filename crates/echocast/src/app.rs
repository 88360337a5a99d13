use crate::{
    AppCommand, AppError, AppResult, FeedbackHandler, Notification,
    app_command::HELP,
    auth_worker::{AuthChannel, AuthReply, AuthRequest},
    config::Config,
};

use std::{io::Write, panic::Location};

use echocast_core::{
    IntervalTicker, RecordingEvent, RecordingSessionController, SessionOrigin, SignupForm,
    StudioSession, Tick,
};
use error_location::ErrorLocation;
use tokio::sync::{
    mpsc::{self, error::TrySendError},
    watch,
};
use tracing::{debug, error, info, instrument, trace};

/// Main application state.
///
/// Owns the active studio session. Commands, ticks and identity replies are
/// all handled on this loop, so core state is never shared. Identity calls
/// run on the auth worker and never block the loop.
pub struct App<W> {
    pub(crate) auth: AuthChannel,
    pub(crate) config: Config,
    pub(crate) feedback: FeedbackHandler<W>,
    pub(crate) session: Option<StudioSession>,
    pub(crate) studio: Option<RecordingSessionController>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) tick_tx: mpsc::Sender<Tick>,
    pub(crate) tick_rx: mpsc::Receiver<Tick>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

/// Capacity of the tick channel. Ticks are tiny and drained every loop turn.
const TICK_CHANNEL_CAPACITY: usize = 16;

impl<W: Write> App<W> {
    /// Assemble the application around an identity client and a command source.
    pub(crate) fn new(
        config: Config,
        auth: AuthChannel,
        feedback: FeedbackHandler<W>,
        command_rx: mpsc::Receiver<AppCommand>,
        shutdown_tx: watch::Sender<bool>,
    ) -> Self {
        let (tick_tx, tick_rx) = mpsc::channel(TICK_CHANNEL_CAPACITY);

        Self {
            auth,
            config,
            feedback,
            session: None,
            studio: None,
            command_rx,
            tick_tx,
            tick_rx,
            shutdown_tx,
        }
    }

    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!(base_url = %self.config.server.base_url, "EchoCast starting");
        self.feedback.line("EchoCast ready. Type `help` for commands.")?;

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    let Some(cmd) = cmd else {
                        info!("Command channel closed, shutting down");
                        break;
                    };

                    if cmd == AppCommand::Shutdown {
                        info!("Shutdown requested");
                        break;
                    }

                    if let Err(e) = self.handle_command(cmd) {
                        error!(error = %e, "Command failed");
                        self.feedback.notify(&Notification::from_error(&e))?;
                    }
                }

                Some(tick) = self.tick_rx.recv() => {
                    self.handle_tick(tick);
                }

                Some(reply) = self.auth.reply_rx.recv() => {
                    if let Err(e) = self.handle_auth_reply(reply) {
                        error!(error = %e, "Identity request failed");
                        self.feedback.notify(&Notification::from_error(&e))?;
                    }
                }
            }
        }

        if let Some(studio) = self.studio.as_mut() {
            if let Some(event) = studio.stop() {
                self.feedback.notify(&Notification::for_event(event))?;
            }
        }

        let _ = self.shutdown_tx.send(true);
        info!("EchoCast shut down successfully");

        Ok(())
    }

    /// Apply one command. Failures are returned for the caller to report.
    ///
    /// Identity commands only enqueue a request; their outcome arrives later
    /// through [`App::handle_auth_reply`].
    #[instrument(skip(self, cmd), fields(command = cmd.name()))]
    pub(crate) fn handle_command(&mut self, cmd: AppCommand) -> AppResult<()> {
        match cmd {
            AppCommand::Signup {
                email,
                password,
                confirm_password,
            } => {
                let form = SignupForm::new(email, password, confirm_password);
                form.validate()?;
                self.request(AuthRequest::Signup(form))?;
            }
            AppCommand::Login { email, password } => {
                self.request(AuthRequest::Login { email, password })?;
            }
            AppCommand::Me => self.request(AuthRequest::Me)?,
            AppCommand::Logout => self.request(AuthRequest::Logout)?,
            AppCommand::Health => self.request(AuthRequest::Health)?,
            AppCommand::Create { title } => {
                let session = StudioSession::create(&title)?;
                self.open_studio(session)?;
            }
            AppCommand::Join { code } => {
                let session = StudioSession::join(&code)?;
                self.open_studio(session)?;
            }
            AppCommand::Start => {
                let event = self.studio_mut()?.start();
                self.report(event)?;
            }
            AppCommand::Pause => {
                let event = self.studio_mut()?.pause();
                self.report(event)?;
            }
            AppCommand::Resume => {
                let event = self.studio_mut()?.resume();
                self.report(event)?;
            }
            AppCommand::Stop => {
                let event = self.studio_mut()?.stop();
                self.report(event)?;
            }
            AppCommand::Mic => {
                let event = self.studio_mut()?.toggle_mic();
                self.report(Some(event))?;
            }
            AppCommand::Camera => {
                let event = self.studio_mut()?.toggle_camera();
                self.report(Some(event))?;
            }
            AppCommand::Speaker => {
                let event = self.studio_mut()?.toggle_speaker();
                self.report(Some(event))?;
            }
            AppCommand::Status => match (self.session.as_ref(), self.studio.as_ref()) {
                (Some(session), Some(studio)) => {
                    self.feedback.line(&format!(
                        "Session {} | invite: {}",
                        session.code(),
                        session.join_link()
                    ))?;
                    self.feedback.status(studio)?;
                }
                _ => self.feedback.line("No active session")?,
            },
            AppCommand::Help => self.feedback.line(HELP)?,
            AppCommand::Shutdown => {}
        }

        Ok(())
    }

    /// Forward a tick to the active controller. Stale ticks are dropped there.
    pub(crate) fn handle_tick(&mut self, tick: Tick) {
        match self.studio.as_mut() {
            Some(studio) => {
                if studio.on_tick(tick) {
                    trace!(elapsed = %studio.formatted_elapsed(), "Tick");
                } else {
                    debug!(
                        session_id = %tick.session_id,
                        epoch = tick.epoch,
                        "Discarded stale tick"
                    );
                }
            }
            None => debug!(session_id = %tick.session_id, epoch = tick.epoch, "Discarded tick"),
        }
    }

    /// Report the outcome of an identity request.
    pub(crate) fn handle_auth_reply(&mut self, reply: AuthReply) -> AppResult<()> {
        match reply {
            AuthReply::SignedUp(user) => {
                let user = user?;
                self.feedback.notify(&Notification::info(
                    "Account Created",
                    format!("{} is registered. Log in to continue", user.email),
                ))
            }
            AuthReply::LoginFailed(e) => Err(AppError::from(e)),
            AuthReply::LoggedIn { profile: Ok(user) } => self.feedback.notify(&Notification::info(
                "Welcome back!",
                format!("Signed in as {}", user.email),
            )),
            AuthReply::LoggedIn { profile: Err(e) } => {
                self.feedback.notify(&Notification::info(
                    "Signed In",
                    "Signed in, but your profile could not be loaded",
                ))?;
                Err(AppError::from(e))
            }
            AuthReply::Profile(user) => {
                let user = user?;
                self.feedback.profile(&user)
            }
            AuthReply::LoggedOut(result) => {
                result?;
                self.feedback.notify(&Notification::info(
                    "Signed Out",
                    "Stored credentials were removed",
                ))
            }
            AuthReply::Health { base_url, status } => {
                let health = status?;
                self.feedback.notify(&Notification::info(
                    "Service Status",
                    format!("{} reports {}", base_url, health.status),
                ))
            }
        }
    }

    /// Hand a request to the auth worker without waiting on it.
    #[track_caller]
    fn request(&self, request: AuthRequest) -> AppResult<()> {
        let location = ErrorLocation::from(Location::caller());
        let name = request.name();

        match self.auth.request_tx.try_send(request) {
            Ok(()) => {
                debug!(request = name, "Identity request queued");
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(AppError::ChannelSendFailed {
                message: "Identity service is busy, try again shortly".to_string(),
                location,
            }),
            Err(TrySendError::Closed(_)) => Err(AppError::ChannelSendFailed {
                message: "Identity service is unavailable".to_string(),
                location,
            }),
        }
    }

    /// Replace the active studio. Dropping the previous controller cancels its timer.
    fn open_studio(&mut self, session: StudioSession) -> AppResult<()> {
        let roster = self.config.studio.roster()?;
        let ticker = IntervalTicker::new(self.config.studio.tick_interval(), self.tick_tx.clone());
        let studio = RecordingSessionController::new(session.title(), roster).with_ticker(ticker);

        if let Some(previous) = self.studio.replace(studio) {
            info!(session_id = %previous.session_id(), "Previous session closed");
        }

        let notification = match session.origin() {
            SessionOrigin::Created => Notification::session_created(&session),
            SessionOrigin::Joined => Notification::session_joined(&session),
        };
        info!(code = %session.code(), "Studio session opened");
        self.session = Some(session);

        self.feedback.notify(&notification)
    }

    #[track_caller]
    fn studio_mut(&mut self) -> AppResult<&mut RecordingSessionController> {
        let location = ErrorLocation::from(Location::caller());
        self.studio
            .as_mut()
            .ok_or(AppError::NoActiveSession { location })
    }

    fn report(&mut self, event: Option<RecordingEvent>) -> AppResult<()> {
        match event {
            Some(event) => self.feedback.notify(&Notification::for_event(event)),
            None => {
                debug!("Command ignored in current state");
                Ok(())
            }
        }
    }
}
