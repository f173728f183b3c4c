//! CalendarSource trait, Google implementation, and normalization pipeline.
//!
//! This crate provides the calendar side of pinfeed:
//!
//! - [`CalendarSource`] - The trait the HTTP surface programs against
//! - [`RawEvent`] - Event data as the calendar handed it over
//! - [`normalize_event`] - Pipeline producing the API's output shape
//! - [`SourceError`] - Error types for source operations
//!
//! ```text
//! ┌──────────────────┐
//! │ Google Calendar  │
//! └────────┬─────────┘
//!          │ GoogleCalendarSource
//!          ▼
//!   ┌─────────────┐   normalize_event()   ┌──────────────────┐
//!   │  RawEvent   │ ────────────────────▶ │ NormalizedEvent  │
//!   └─────────────┘                       └──────────────────┘
//! ```

pub mod error;
pub mod google;
pub mod normalize;
pub mod raw_event;
pub mod source;

pub use error::{SourceError, SourceErrorCode, SourceResult};
pub use normalize::{NO_TITLE, normalize_event, normalize_events};
pub use raw_event::RawEvent;
pub use source::{BoxFuture, CalendarSource, DEFAULT_MAX_RESULTS, FetchOptions};
