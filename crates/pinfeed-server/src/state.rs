use std::sync::Arc;

use pinfeed_providers::CalendarSource;

/// Shared handler state.
///
/// The calendar source is constructed once at startup. If construction fails
/// the server still comes up so `/api/v1/health` can report the failure, and
/// the error message is kept for the events endpoint to surface.
#[derive(Clone)]
pub struct AppState {
    source: Option<Arc<dyn CalendarSource>>,
    init_error: Option<String>,
}

impl AppState {
    /// State for a successfully initialized calendar source.
    pub fn available(source: Arc<dyn CalendarSource>) -> Self {
        Self {
            source: Some(source),
            init_error: None,
        }
    }

    /// State recording a failed source initialization.
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            source: None,
            init_error: Some(error.into()),
        }
    }

    pub fn source(&self) -> Option<&Arc<dyn CalendarSource>> {
        self.source.as_ref()
    }

    pub fn init_error(&self) -> Option<&str> {
        self.init_error.as_deref()
    }
}
