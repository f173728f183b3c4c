//! Google Calendar source configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// OAuth 2.0 client credentials for Google API access.
///
/// Loaded from the JSON file downloaded from the Google Cloud Console.
/// The interactive consent flow that mints the token file lives outside
/// this service; these credentials are only needed to refresh the access
/// token.
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    /// The OAuth 2.0 client ID.
    pub client_id: String,
    /// The OAuth 2.0 client secret.
    pub client_secret: String,
}

/// Structure of Google's OAuth credentials JSON file.
///
/// Supports the Google Cloud Console format with an "installed" or "web"
/// section, and the flat format with client_id/client_secret at the root.
#[derive(Debug, Deserialize)]
struct CredentialsFile {
    installed: Option<NestedCredentials>,
    web: Option<NestedCredentials>,
    client_id: Option<String>,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NestedCredentials {
    client_id: String,
    client_secret: String,
}

impl OAuthCredentials {
    /// Creates new OAuth credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Loads OAuth credentials from a Google Cloud Console JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("failed to read credentials file: {}", e))?;
        Self::from_json(&content)
    }

    /// Parses OAuth credentials from a credentials JSON string.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let file: CredentialsFile = serde_json::from_str(json)
            .map_err(|e| format!("failed to parse credentials JSON: {}", e))?;

        if let Some(creds) = file.installed.or(file.web) {
            return Ok(Self::new(creds.client_id, creds.client_secret));
        }

        if let (Some(client_id), Some(client_secret)) = (file.client_id, file.client_secret) {
            return Ok(Self::new(client_id, client_secret));
        }

        Err("credentials file must contain an 'installed'/'web' section or \
             'client_id'/'client_secret' at root level"
            .to_string())
    }

    /// Validates that the credentials are usable.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.client_id.is_empty() {
            return Err("client_id is required");
        }
        if self.client_secret.is_empty() {
            return Err("client_secret is required");
        }
        Ok(())
    }
}

/// Configuration for the Google Calendar source.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// The calendar to fetch events from.
    pub calendar_id: String,

    /// Path to the OAuth credentials JSON file.
    pub credentials_path: PathBuf,

    /// Path to the stored token file.
    pub token_path: PathBuf,

    /// Request timeout for calls to the Calendar API.
    pub timeout: Duration,
}

impl GoogleConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a new configuration for the given calendar.
    ///
    /// Defaults to `credentials.json` and `token.json` in the working
    /// directory, matching how the token is provisioned out of band.
    pub fn new(calendar_id: impl Into<String>) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            credentials_path: PathBuf::from("credentials.json"),
            token_path: PathBuf::from("token.json"),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the credentials file path.
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = path.into();
        self
    }

    /// Sets the token file path.
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.calendar_id.is_empty() {
            return Err("calendar_id is required".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GoogleConfig::new("team@example.com");
        assert_eq!(config.calendar_id, "team@example.com");
        assert_eq!(config.credentials_path, PathBuf::from("credentials.json"));
        assert_eq!(config.token_path, PathBuf::from("token.json"));
        assert_eq!(
            config.timeout,
            Duration::from_secs(GoogleConfig::DEFAULT_TIMEOUT_SECS)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_methods() {
        let config = GoogleConfig::new("primary")
            .with_credentials_path("/etc/pinfeed/credentials.json")
            .with_token_path("/var/lib/pinfeed/token.json")
            .with_timeout(Duration::from_secs(10));

        assert_eq!(
            config.credentials_path,
            PathBuf::from("/etc/pinfeed/credentials.json")
        );
        assert_eq!(config.token_path, PathBuf::from("/var/lib/pinfeed/token.json"));
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn empty_calendar_id_rejected() {
        assert!(GoogleConfig::new("").validate().is_err());
    }

    #[test]
    fn credentials_from_json_installed() {
        let json = r#"{
            "installed": {
                "client_id": "test-id.apps.googleusercontent.com",
                "client_secret": "test-secret",
                "redirect_uris": ["http://localhost"]
            }
        }"#;

        let creds = OAuthCredentials::from_json(json).unwrap();
        assert_eq!(creds.client_id, "test-id.apps.googleusercontent.com");
        assert_eq!(creds.client_secret, "test-secret");
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn credentials_from_json_web() {
        let json = r#"{
            "web": {
                "client_id": "web-id.apps.googleusercontent.com",
                "client_secret": "web-secret"
            }
        }"#;

        let creds = OAuthCredentials::from_json(json).unwrap();
        assert_eq!(creds.client_id, "web-id.apps.googleusercontent.com");
    }

    #[test]
    fn credentials_from_json_flat() {
        let json = r#"{
            "client_id": "flat-id.apps.googleusercontent.com",
            "client_secret": "flat-secret"
        }"#;

        let creds = OAuthCredentials::from_json(json).unwrap();
        assert_eq!(creds.client_secret, "flat-secret");
    }

    #[test]
    fn credentials_from_json_invalid() {
        assert!(OAuthCredentials::from_json(r#"{ "other": {} }"#).is_err());
        assert!(OAuthCredentials::from_json("not json").is_err());
    }

    #[test]
    fn empty_credentials_rejected() {
        assert!(OAuthCredentials::new("", "secret").validate().is_err());
        assert!(OAuthCredentials::new("id", "").validate().is_err());
    }
}
