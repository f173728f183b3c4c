//! Google Calendar source implementation.
//!
//! Implements [`CalendarSource`] for Google Calendar. Construction happens
//! once at process bootstrap: the credentials and token files are loaded,
//! and a missing or invalid file fails construction with a configuration
//! error the server retains for its health endpoint.

use chrono::Utc;
use tokio::sync::RwLock as TokioRwLock;
use tracing::debug;

use crate::error::{SourceError, SourceResult};
use crate::raw_event::RawEvent;
use crate::source::{BoxFuture, CalendarSource, FetchOptions};

use super::auth::TokenRefresher;
use super::client::GoogleCalendarClient;
use super::config::GoogleConfig;
use super::tokens::TokenStore;

/// Google Calendar source.
///
/// Shared read-only across requests; the only interior mutability is the
/// API client's access token, swapped on refresh behind an async lock.
#[derive(Debug)]
pub struct GoogleCalendarSource {
    config: GoogleConfig,
    token_store: TokenStore,
    refresher: TokenRefresher,
    client: TokioRwLock<GoogleCalendarClient>,
}

impl GoogleCalendarSource {
    /// Creates the source from its configuration.
    ///
    /// Reads the credentials file and the externally-provisioned token
    /// file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when either file is missing or
    /// malformed; the caller records the message for the health endpoint.
    pub fn new(config: GoogleConfig) -> SourceResult<Self> {
        config.validate().map_err(SourceError::configuration)?;

        let credentials = super::config::OAuthCredentials::from_file(&config.credentials_path)
            .map_err(SourceError::configuration)?;
        credentials
            .validate()
            .map_err(SourceError::configuration)?;

        let token_store = TokenStore::new(&config.token_path);
        token_store.load()?;

        let tokens = token_store
            .get()
            .ok_or_else(|| SourceError::internal("token store empty after load"))?;

        let refresher = TokenRefresher::new(credentials, config.timeout)?;
        let client = GoogleCalendarClient::new(&tokens.access_token, config.timeout)?;

        Ok(Self {
            config,
            token_store,
            refresher,
            client: TokioRwLock::new(client),
        })
    }

    /// Refreshes the access token if the stored one has expired.
    async fn ensure_fresh_token(&self) -> SourceResult<()> {
        let tokens = self
            .token_store
            .get()
            .ok_or_else(|| SourceError::internal("token store empty"))?;

        if !tokens.is_expired() {
            return Ok(());
        }

        let refresh_token = tokens.refresh_token.as_ref().ok_or_else(|| {
            SourceError::authentication("access token expired and no refresh token available")
        })?;

        debug!("refreshing expired access token");
        let (new_access_token, expires_in) = self.refresher.refresh(refresh_token).await?;

        self.token_store
            .update_access_token(&new_access_token, expires_in)?;
        self.client.write().await.set_access_token(&new_access_token);

        Ok(())
    }

    async fn fetch_events_impl(&self, options: &FetchOptions) -> SourceResult<Vec<RawEvent>> {
        self.ensure_fresh_token().await?;

        let time_min = options.time_min.unwrap_or_else(Utc::now);

        let client = self.client.read().await;
        client
            .list_events(
                &self.config.calendar_id,
                time_min,
                options.max_results,
                options.expand_recurring,
            )
            .await
    }
}

impl CalendarSource for GoogleCalendarSource {
    fn name(&self) -> &str {
        "google"
    }

    fn fetch_events(&self, options: FetchOptions) -> BoxFuture<'_, SourceResult<Vec<RawEvent>>> {
        Box::pin(async move { self.fetch_events_impl(&options).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceErrorCode;

    #[test]
    fn missing_credentials_file_is_configuration_error() {
        let config = GoogleConfig::new("primary")
            .with_credentials_path("/nonexistent/credentials.json")
            .with_token_path("/nonexistent/token.json");

        let err = GoogleCalendarSource::new(config).unwrap_err();
        assert_eq!(err.code(), SourceErrorCode::ConfigurationError);
        assert!(err.message().contains("credentials"));
    }

    #[test]
    fn missing_token_file_is_configuration_error() {
        let dir = std::env::temp_dir();
        let credentials_path = dir.join(format!(
            "pinfeed-test-credentials-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &credentials_path,
            r#"{"installed":{"client_id":"id.apps.googleusercontent.com","client_secret":"s","redirect_uris":["http://localhost"]}}"#,
        )
        .unwrap();

        let config = GoogleConfig::new("primary")
            .with_credentials_path(&credentials_path)
            .with_token_path("/nonexistent/token.json");

        let err = GoogleCalendarSource::new(config).unwrap_err();
        assert_eq!(err.code(), SourceErrorCode::ConfigurationError);
        assert!(err.message().contains("token"));

        let _ = std::fs::remove_file(&credentials_path);
    }
}
