//! EchoCast: console driver for the recording studio session core.

mod app;
mod app_command;
mod auth_worker;
mod config;
mod error;
mod feedback;
mod input_handler;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    auth_worker::AuthWorker,
    error::{AppError, Result as AppResult},
    feedback::{FeedbackHandler, Notification},
    input_handler::InputHandler,
};

use crate::config::Config;

use std::time::Duration;

use echocast_core::{AuthClient, FileCredentialStore, SessionContext};
use tokio::{
    io::BufReader,
    sync::{mpsc, watch},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "echocast=info,echocast_core=info";

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let store = match FileCredentialStore::open_default() {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open credential store: {:?}", e);
            std::process::exit(1);
        }
    };

    let auth = match AuthClient::new(
        config.auth_client_config(),
        SessionContext::new(Box::new(store)),
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create identity client: {:?}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let input_handler = InputHandler::new(BufReader::new(tokio::io::stdin()), command_tx);
        let (auth_worker, auth_channel) = AuthWorker::new(auth);
        let app = App::new(
            config,
            auth_channel,
            FeedbackHandler::new(std::io::stdout()),
            command_rx,
            shutdown_tx,
        );

        tokio::join!(
            async {
                if let Err(e) = input_handler.run(shutdown_rx.clone()).await {
                    error!(error = ?e, "Input handler error");
                }
            },
            async {
                if let Err(e) = app.run().await {
                    error!(error = ?e, "App error");
                }
            },
            auth_worker.run(shutdown_rx.clone())
        );
    });

    // Stdin reads run on a blocking thread that cannot be interrupted.
    rt.shutdown_timeout(Duration::from_secs(1));
    info!("Goodbye");
}
