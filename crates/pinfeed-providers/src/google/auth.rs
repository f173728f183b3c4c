//! Access-token refresh against Google's OAuth token endpoint.
//!
//! The interactive consent flow that mints the refresh token happens
//! outside this service; this module only exchanges a stored refresh token
//! for a fresh access token when the stored one has expired.

use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::{SourceError, SourceResult};

use super::config::OAuthCredentials;

/// Google's OAuth 2.0 token endpoint.
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Exchanges refresh tokens for access tokens.
#[derive(Debug)]
pub struct TokenRefresher {
    http_client: reqwest::Client,
    credentials: OAuthCredentials,
}

/// Response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

impl TokenRefresher {
    /// Creates a new refresher with the given client credentials.
    pub fn new(credentials: OAuthCredentials, timeout: Duration) -> SourceResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            credentials,
        })
    }

    /// Obtains a new access token using the stored refresh token.
    ///
    /// Returns the new access token and its lifetime in seconds.
    ///
    /// # Errors
    ///
    /// Returns an authentication error when Google rejects the refresh
    /// token (revoked or expired grant), a network error when the request
    /// fails to complete.
    pub async fn refresh(&self, refresh_token: &str) -> SourceResult<(String, Option<i64>)> {
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http_client
            .post(GOOGLE_TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| SourceError::network(format!("token refresh request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::network(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(SourceError::authentication(format!(
                "token refresh failed ({}): {}",
                status, body
            )));
        }

        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| SourceError::invalid_response(format!("invalid token response: {}", e)))?;

        info!("refreshed access token");
        Ok((token_response.access_token, token_response.expires_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_parses() {
        let json = r#"{
            "access_token": "ya29.fresh",
            "expires_in": 3599,
            "scope": "https://www.googleapis.com/auth/calendar.readonly",
            "token_type": "Bearer"
        }"#;

        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "ya29.fresh");
        assert_eq!(response.expires_in, Some(3599));
    }

    #[test]
    fn refresher_construction() {
        let credentials = OAuthCredentials::new("id.apps.googleusercontent.com", "secret");
        assert!(TokenRefresher::new(credentials, Duration::from_secs(5)).is_ok());
    }
}
