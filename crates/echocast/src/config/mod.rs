mod config;
mod server_config;
mod studio_config;

pub(crate) use {
    config::Config,
    server_config::ServerConfig,
    studio_config::{RemoteParticipantConfig, StudioConfig},
};

pub(crate) const DEFAULT_BASE_URL: &str = echocast_core::DEFAULT_BASE_URL;
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_DISPLAY_NAME: &str = "You";

pub(crate) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(crate) fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

pub(crate) fn default_display_name() -> String {
    DEFAULT_DISPLAY_NAME.to_string()
}

pub(crate) fn default_tick_interval_ms() -> u64 {
    u64::try_from(echocast_core::DEFAULT_TICK_INTERVAL.as_millis()).unwrap_or(u64::MAX)
}

pub(crate) fn default_device_on() -> bool {
    true
}
