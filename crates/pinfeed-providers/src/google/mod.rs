//! Google Calendar source implementation.
//!
//! Fetches events from the Google Calendar API v3 using credentials and a
//! refresh/access token pair provisioned out of band:
//!
//! 1. An operator runs an external consent flow once, producing
//!    `token.json` alongside the `credentials.json` downloaded from the
//!    Google Cloud Console.
//! 2. At process start, [`GoogleCalendarSource::new`] loads both files;
//!    a missing or malformed file marks the source unavailable.
//! 3. Per fetch, the access token is refreshed if expired and one page of
//!    upcoming events is requested, ordered by start time with recurring
//!    events expanded.

mod auth;
mod client;
mod config;
mod source;
mod tokens;

pub use auth::TokenRefresher;
pub use client::GoogleCalendarClient;
pub use config::{GoogleConfig, OAuthCredentials};
pub use source::GoogleCalendarSource;
pub use tokens::{TokenInfo, TokenStore};
