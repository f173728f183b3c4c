//! Event color resolution.
//!
//! Google Calendar tags events with a small-integer color identifier
//! (`"1"` through `"11"`). This module maps those identifiers to the fixed
//! background colors the feed serves, falling back to the calendar's
//! default blue for events without an explicit color.

/// Background color used when the event carries no recognized color id.
pub const FALLBACK_COLOR: &str = "#039be5";

/// Resolves an optional color identifier to a background color.
///
/// Known identifiers (`"1"`..`"11"`) map to the standard Google event
/// palette. Anything else, including a missing identifier, resolves to
/// [`FALLBACK_COLOR`]. This function is total and never fails.
pub fn background_color(color_id: Option<&str>) -> &'static str {
    match color_id {
        Some("1") => "#7986cb",
        Some("2") => "#33b679",
        Some("3") => "#8e24aa",
        Some("4") => "#e67c73",
        Some("5") => "#f6c026",
        Some("6") => "#f5511d",
        Some("7") => "#039be5",
        Some("8") => "#616161",
        Some("9") => "#3f51b5",
        Some("10") => "#0b8043",
        Some("11") => "#d60000",
        _ => FALLBACK_COLOR,
    }
}
