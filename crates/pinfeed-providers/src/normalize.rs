//! RawEvent to NormalizedEvent conversion pipeline.
//!
//! The normalization process:
//! 1. Resolves the event's background color from its color identifier
//! 2. Derives the legible text color from the background's luminance
//! 3. Extracts the short location label and categorized hyperlinks
//! 4. Builds the final [`NormalizedEvent`] with defaults for absent fields

use tracing::warn;

use pinfeed_core::{
    NormalizedEvent, TextColor, background_color, contrast, extract_urls, location_short,
};

use crate::raw_event::RawEvent;

/// Title used when the calendar supplied none.
pub const NO_TITLE: &str = "No Title";

/// Converts a [`RawEvent`] to a [`NormalizedEvent`].
///
/// Pure: the output depends only on the raw event and the static color
/// palette. Never fails; every optional field has a documented default.
pub fn normalize_event(raw: &RawEvent) -> NormalizedEvent {
    let background = background_color(raw.color_id.as_deref());

    // Palette entries are well-formed hex, so this only trips if the table
    // itself is ever broken. Default to white rather than failing the batch.
    let text_color = contrast::text_color(background).unwrap_or_else(|err| {
        warn!(event_id = %raw.id, %err, "unparseable background color");
        TextColor::White
    });

    let summary = raw
        .summary
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(NO_TITLE)
        .to_string();

    NormalizedEvent {
        id: raw.id.clone(),
        summary,
        start: raw.start.clone(),
        end: raw.end.clone(),
        location: raw.location.clone().unwrap_or_default(),
        location_short: location_short(raw.location.as_deref()),
        html_link: raw.html_link.clone(),
        background_color: background.to_string(),
        text_color,
        urls: extract_urls(raw.description.as_deref()),
        attachments: raw.attachments.clone(),
    }
}

/// Batch normalize multiple raw events, preserving order.
pub fn normalize_events(raw_events: &[RawEvent]) -> Vec<NormalizedEvent> {
    raw_events.iter().map(normalize_event).collect()
}
