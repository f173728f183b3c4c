use std::net::SocketAddr;
use std::sync::Arc;

use pinfeed_core::{TracingConfig, init_tracing};
use pinfeed_providers::google::{GoogleCalendarSource, GoogleConfig};
use pinfeed_server::{AppState, ServerConfig, app};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(TracingConfig::server())?;

    let config = ServerConfig::from_env();
    let google_config = GoogleConfig::new(&config.calendar_id)
        .with_credentials_path(&config.credentials_path)
        .with_token_path(&config.token_path);

    let state = match GoogleCalendarSource::new(google_config) {
        Ok(source) => {
            info!(calendar_id = %config.calendar_id, "calendar source initialized");
            AppState::available(Arc::new(source))
        }
        Err(err) => {
            error!(%err, "calendar source initialization failed");
            AppState::unavailable(err.to_string())
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(port = config.port, "API server listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
