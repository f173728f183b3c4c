//! Server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use tracing::warn;

/// Default TCP port when `PORT` is unset or unparseable.
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration for the HTTP server and its calendar source.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to bind on all interfaces.
    pub port: u16,
    /// Calendar to read events from.
    pub calendar_id: String,
    /// Path to the OAuth client credentials file.
    pub credentials_path: PathBuf,
    /// Path to the stored token file.
    pub token_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            calendar_id: "primary".to_string(),
            credentials_path: PathBuf::from("credentials.json"),
            token_path: PathBuf::from("token.json"),
        }
    }
}

impl ServerConfig {
    /// Builds the configuration from the process environment.
    ///
    /// Reads `PORT`, `PINFEED_CALENDAR_ID`, `PINFEED_CREDENTIALS_PATH` and
    /// `PINFEED_TOKEN_PATH`, falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: parse_port(env::var("PORT").ok()),
            calendar_id: env::var("PINFEED_CALENDAR_ID").unwrap_or(defaults.calendar_id),
            credentials_path: env::var("PINFEED_CREDENTIALS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.credentials_path),
            token_path: env::var("PINFEED_TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.token_path),
        }
    }
}

fn parse_port(raw: Option<String>) -> u16 {
    match raw {
        Some(value) => match value.parse() {
            Ok(port) => port,
            Err(_) => {
                warn!(value = %value, "invalid PORT value, using default");
                DEFAULT_PORT
            }
        },
        None => DEFAULT_PORT,
    }
}
