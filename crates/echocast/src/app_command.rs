use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Commands sent from the input handler to the main application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Register a new account.
    Signup {
        /// Account email.
        email: String,
        /// Chosen password.
        password: String,
        /// Password confirmation.
        confirm_password: String,
    },
    /// Exchange credentials for a token.
    Login {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
    /// Fetch the signed-in user's profile.
    Me,
    /// Forget stored credentials.
    Logout,
    /// Probe the identity service.
    Health,
    /// Create a new studio session.
    Create {
        /// Session title.
        title: String,
    },
    /// Join an existing studio session by code.
    Join {
        /// Session code.
        code: String,
    },
    /// Begin recording.
    Start,
    /// Toggle pause.
    Pause,
    /// Resume a paused recording.
    Resume,
    /// Stop and reset the recording.
    Stop,
    /// Flip the local microphone.
    Mic,
    /// Flip the local camera.
    Camera,
    /// Flip local playback mute.
    Speaker,
    /// Print the current session state.
    Status,
    /// Print the command list.
    Help,
    /// Request application shutdown.
    Shutdown,
}

impl AppCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    #[track_caller]
    pub fn parse(line: &str) -> AppResult<Option<AppCommand>> {
        let line = line.trim();
        let Some((verb, rest)) = split_verb(line) else {
            return Ok(None);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "signup" => {
                let [email, password, confirm_password] = args::<3>(verb, rest)?;
                AppCommand::Signup {
                    email,
                    password,
                    confirm_password,
                }
            }
            "login" => {
                let [email, password] = args::<2>(verb, rest)?;
                AppCommand::Login { email, password }
            }
            // Titles keep their inner spacing; blank ones are rejected downstream.
            "create" => AppCommand::Create {
                title: rest.to_string(),
            },
            "join" => AppCommand::Join {
                code: rest.to_string(),
            },
            other => {
                if !rest.is_empty() {
                    return Err(AppError::InvalidCommand {
                        reason: format!("`{}` takes no arguments", other),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                match other {
                    "me" => AppCommand::Me,
                    "logout" => AppCommand::Logout,
                    "health" => AppCommand::Health,
                    "start" => AppCommand::Start,
                    "pause" => AppCommand::Pause,
                    "resume" => AppCommand::Resume,
                    "stop" => AppCommand::Stop,
                    "mic" => AppCommand::Mic,
                    "camera" => AppCommand::Camera,
                    "speaker" => AppCommand::Speaker,
                    "status" => AppCommand::Status,
                    "help" | "?" => AppCommand::Help,
                    "quit" | "exit" => AppCommand::Shutdown,
                    _ => {
                        return Err(AppError::InvalidCommand {
                            reason: format!("Unknown command `{}`. Type `help` for a list", other),
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                }
            }
        };

        Ok(Some(command))
    }

    /// Command verb, safe to log. Arguments may carry passwords.
    pub fn name(&self) -> &'static str {
        match self {
            AppCommand::Signup { .. } => "signup",
            AppCommand::Login { .. } => "login",
            AppCommand::Me => "me",
            AppCommand::Logout => "logout",
            AppCommand::Health => "health",
            AppCommand::Create { .. } => "create",
            AppCommand::Join { .. } => "join",
            AppCommand::Start => "start",
            AppCommand::Pause => "pause",
            AppCommand::Resume => "resume",
            AppCommand::Stop => "stop",
            AppCommand::Mic => "mic",
            AppCommand::Camera => "camera",
            AppCommand::Speaker => "speaker",
            AppCommand::Status => "status",
            AppCommand::Help => "help",
            AppCommand::Shutdown => "quit",
        }
    }
}

/// Command reference printed by `help`.
pub(crate) const HELP: &str = "\
Account:   signup <email> <password> <confirm> | login <email> <password> | me | logout | health
Session:   create <title> | join <code>
Recording: start | pause | resume | stop | status
Devices:   mic | camera | speaker
Other:     help | quit";

fn split_verb(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => Some((verb, rest.trim())),
        None => Some((line, "")),
    }
}

#[track_caller]
fn args<const N: usize>(verb: &str, rest: &str) -> AppResult<[String; N]> {
    let parts: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
    let found = parts.len();
    let location = ErrorLocation::from(Location::caller());

    parts.try_into().map_err(|_| AppError::InvalidCommand {
        reason: format!("`{}` expects {} arguments, got {}", verb, N, found),
        location,
    })
}
