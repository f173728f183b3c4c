//! Core types and annotators: events, palette, contrast, extractors

pub mod contrast;
pub mod event;
pub mod extract;
pub mod palette;
pub mod tracing;

pub use contrast::{ColorParseError, TextColor, relative_luminance, text_color};
pub use event::{Attachment, EventTime, EventUrls, NormalizedEvent};
pub use extract::{NO_LOCATION, RESULTS_MARKER, extract_urls, location_short};
pub use palette::{FALLBACK_COLOR, background_color};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
