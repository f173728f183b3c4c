//! CalendarSource trait definition.
//!
//! [`CalendarSource`] is the abstraction over the external calendar backend.
//! The HTTP surface holds one source for the lifetime of the process and
//! asks it for a single page of upcoming events per request.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};

use crate::error::SourceResult;
use crate::raw_event::RawEvent;

/// Default page size for event fetches.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Options for fetching events.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Lower bound for event start time. When unset, the source uses "now".
    pub time_min: Option<DateTime<Utc>>,
    /// Maximum number of events to return (single page, no pagination).
    pub max_results: usize,
    /// Whether to expand recurring events into single occurrences.
    pub expand_recurring: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            time_min: None,
            max_results: DEFAULT_MAX_RESULTS,
            expand_recurring: true,
        }
    }
}

impl FetchOptions {
    /// Creates fetch options with defaults: upcoming events from "now",
    /// one page of up to [`DEFAULT_MAX_RESULTS`], recurrences expanded.
    pub fn upcoming() -> Self {
        Self::default()
    }

    /// Builder method to set the lower time bound.
    pub fn with_time_min(mut self, time_min: DateTime<Utc>) -> Self {
        self.time_min = Some(time_min);
        self
    }

    /// Builder method to set the page size.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

/// A boxed future for async trait methods.
///
/// Boxing keeps the trait object-safe so the server can hold the source as
/// a `dyn CalendarSource` behind an `Arc`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The abstraction over the external calendar backend.
///
/// Implementations fetch a time-window-filtered, chronologically-ordered,
/// single-occurrence-expanded page of raw events. One outbound call per
/// request; no retries are performed at this layer.
pub trait CalendarSource: Send + Sync {
    /// Returns the name of this source (e.g. "google").
    fn name(&self) -> &str;

    /// Fetches one page of events, ordered by start time.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` on network errors, authentication failures,
    /// rate limiting, or unparseable upstream responses.
    fn fetch_events(&self, options: FetchOptions) -> BoxFuture<'_, SourceResult<Vec<RawEvent>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = FetchOptions::upcoming();
        assert!(options.time_min.is_none());
        assert_eq!(options.max_results, DEFAULT_MAX_RESULTS);
        assert!(options.expand_recurring);
    }

    #[test]
    fn options_builder() {
        let now = Utc::now();
        let options = FetchOptions::upcoming()
            .with_time_min(now)
            .with_max_results(25);

        assert_eq!(options.time_min, Some(now));
        assert_eq!(options.max_results, 25);
    }
}
