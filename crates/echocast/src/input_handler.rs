//! Line-oriented console input.
//!
//! Reads commands from any buffered async reader and forwards them to the
//! main application over a channel. Parse errors are reported and skipped.

use crate::{AppCommand, AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::{mpsc, watch},
};
use tracing::{debug, info, instrument, warn};

/// Forwards parsed console commands to the application.
pub struct InputHandler<R> {
    reader: R,
    command_tx: mpsc::Sender<AppCommand>,
}

impl<R> InputHandler<R>
where
    R: AsyncBufRead + Unpin,
{
    /// Create a handler reading from `reader`.
    pub fn new(reader: R, command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self { reader, command_tx }
    }

    /// Run until shutdown is signalled, the reader hits EOF, or the
    /// application stops listening.
    ///
    /// EOF is treated as a quit request.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let mut line = String::new();

        loop {
            line.clear();

            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Input handler shutting down");
                    break;
                }
                read = self.reader.read_line(&mut line) => {
                    if read? == 0 {
                        debug!("Input closed");
                        self.send(AppCommand::Shutdown).await?;
                        break;
                    }

                    match AppCommand::parse(&line) {
                        Ok(Some(command)) => {
                            let quitting = command == AppCommand::Shutdown;
                            self.send(command).await?;
                            if quitting {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            warn!(error = %e, "Rejected input");
                            eprintln!("{}", e.user_message());
                        }
                    }
                }
            }
        }

        Ok(())
    }

    async fn send(&self, command: AppCommand) -> AppResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to forward command: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
