//! OAuth token loading and persistence.
//!
//! The token file is provisioned by an external consent flow and read at
//! process start. Its shape matches what the googleapis client libraries
//! write: `access_token`, `refresh_token`, and a millisecond-epoch
//! `expiry_date`. After a refresh the new access token is written back
//! atomically.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SourceError, SourceResult};

/// Refresh slightly before actual expiry.
const EXPIRY_BUFFER_MS: i64 = 60_000;

/// A stored OAuth token set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    /// The access token for API requests.
    pub access_token: String,

    /// The refresh token for obtaining new access tokens.
    pub refresh_token: Option<String>,

    /// When the access token expires, as milliseconds since the Unix epoch.
    pub expiry_date: Option<i64>,

    /// The granted OAuth scope string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// The token type, normally "Bearer".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl TokenInfo {
    /// Returns true if the access token is expired or about to expire.
    pub fn is_expired(&self) -> bool {
        match self.expiry_date {
            Some(expiry_ms) => Utc::now().timestamp_millis() >= expiry_ms - EXPIRY_BUFFER_MS,
            // No recorded expiry: assume still valid.
            None => false,
        }
    }

    /// Updates the access token after a refresh.
    pub fn update_access_token(
        &mut self,
        access_token: impl Into<String>,
        expires_in_secs: Option<i64>,
    ) {
        self.access_token = access_token.into();
        self.expiry_date =
            expires_in_secs.map(|secs| Utc::now().timestamp_millis() + secs * 1000);
    }
}

/// File-backed token store.
///
/// Loads the provisioned token file once and keeps an in-memory copy;
/// refreshed tokens are written back via a temp-file rename.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
    tokens: RwLock<Option<TokenInfo>>,
}

impl TokenStore {
    /// Creates a token store for the given path without reading it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tokens: RwLock::new(None),
        }
    }

    /// Loads tokens from disk into memory.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the file is missing or does not
    /// parse; the server surfaces that message through the health endpoint.
    pub fn load(&self) -> SourceResult<()> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            SourceError::configuration(format!(
                "failed to read token file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let tokens: TokenInfo = serde_json::from_str(&content).map_err(|e| {
            SourceError::configuration(format!(
                "failed to parse token file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        if tokens.access_token.is_empty() {
            return Err(SourceError::configuration(format!(
                "token file {} has an empty access_token",
                self.path.display()
            )));
        }

        info!("loaded tokens from {}", self.path.display());
        *self.tokens.write().unwrap() = Some(tokens);
        Ok(())
    }

    /// Returns a clone of the current tokens, if loaded.
    pub fn get(&self) -> Option<TokenInfo> {
        self.tokens.read().unwrap().clone()
    }

    /// Updates the access token and persists the result.
    pub fn update_access_token(
        &self,
        access_token: impl Into<String>,
        expires_in_secs: Option<i64>,
    ) -> SourceResult<()> {
        let mut tokens = self.tokens.write().unwrap();
        if let Some(ref mut t) = *tokens {
            t.update_access_token(access_token, expires_in_secs);
            let snapshot = t.clone();
            drop(tokens);
            self.save(&snapshot)
        } else {
            Err(SourceError::internal("no tokens to update"))
        }
    }

    /// Returns the token file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, tokens: &TokenInfo) -> SourceResult<()> {
        let content = serde_json::to_string_pretty(tokens)
            .map_err(|e| SourceError::internal(format!("failed to serialize tokens: {}", e)))?;

        // Write to a temp file first, then rename for atomicity.
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content).map_err(|e| {
            SourceError::configuration(format!("failed to write token file: {}", e))
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            SourceError::configuration(format!("failed to rename token file: {}", e))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600));
        }

        debug!("saved tokens to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_path() -> PathBuf {
        let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let mut path = env::temp_dir();
        path.push(format!(
            "pinfeed-test-tokens-{}-{}.json",
            std::process::id(),
            counter
        ));
        path
    }

    fn sample_token(expiry_ms: Option<i64>) -> TokenInfo {
        TokenInfo {
            access_token: "access-token".to_string(),
            refresh_token: Some("refresh-token".to_string()),
            expiry_date: expiry_ms,
            scope: Some("https://www.googleapis.com/auth/calendar.readonly".to_string()),
            token_type: Some("Bearer".to_string()),
        }
    }

    #[test]
    fn token_not_expired_in_future() {
        let token = sample_token(Some(Utc::now().timestamp_millis() + 3_600_000));
        assert!(!token.is_expired());
    }

    #[test]
    fn token_expired_in_past() {
        let token = sample_token(Some(Utc::now().timestamp_millis() - 1000));
        assert!(token.is_expired());
    }

    #[test]
    fn token_within_buffer_counts_as_expired() {
        let token = sample_token(Some(Utc::now().timestamp_millis() + EXPIRY_BUFFER_MS / 2));
        assert!(token.is_expired());
    }

    #[test]
    fn token_without_expiry_is_valid() {
        assert!(!sample_token(None).is_expired());
    }

    #[test]
    fn update_access_token_moves_expiry() {
        let mut token = sample_token(Some(0));
        token.update_access_token("new-access", Some(3600));
        assert_eq!(token.access_token, "new-access");
        assert!(!token.is_expired());
    }

    #[test]
    fn store_load_missing_file_errors() {
        let store = TokenStore::new(temp_path());
        let err = store.load().unwrap_err();
        assert!(err.message().contains("failed to read token file"));
        assert!(store.get().is_none());
    }

    #[test]
    fn store_load_and_update_roundtrip() {
        let path = temp_path();
        fs::write(
            &path,
            serde_json::to_string(&sample_token(Some(1))).unwrap(),
        )
        .unwrap();

        let store = TokenStore::new(path.clone());
        store.load().unwrap();
        assert!(store.get().unwrap().is_expired());

        store.update_access_token("fresh", Some(3600)).unwrap();
        assert_eq!(store.get().unwrap().access_token, "fresh");

        // The refreshed token was persisted.
        let store2 = TokenStore::new(path.clone());
        store2.load().unwrap();
        assert_eq!(store2.get().unwrap().access_token, "fresh");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn store_rejects_empty_access_token() {
        let path = temp_path();
        fs::write(&path, r#"{"access_token":"","refresh_token":null,"expiry_date":null}"#)
            .unwrap();

        let store = TokenStore::new(path.clone());
        assert!(store.load().is_err());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn googleapis_token_file_parses() {
        // Shape written by the googleapis Node client.
        let json = r#"{
            "access_token": "ya29.a0Af...",
            "refresh_token": "1//0g...",
            "scope": "https://www.googleapis.com/auth/calendar.readonly",
            "token_type": "Bearer",
            "expiry_date": 1718000000000
        }"#;

        let token: TokenInfo = serde_json::from_str(json).unwrap();
        assert_eq!(token.token_type.as_deref(), Some("Bearer"));
        assert_eq!(token.expiry_date, Some(1_718_000_000_000));
    }
}
