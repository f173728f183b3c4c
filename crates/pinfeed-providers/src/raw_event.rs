//! Raw event type from the calendar source.
//!
//! [`RawEvent`] is the event as the calendar source handed it over, before
//! normalization. It preserves the fields the feed cares about and is
//! converted to a [`NormalizedEvent`](pinfeed_core::NormalizedEvent) by the
//! [`normalize`](crate::normalize) pipeline.

use serde::{Deserialize, Serialize};

use pinfeed_core::{Attachment, EventTime};

/// A raw calendar event as returned by the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Unique identifier for the event within the calendar. Never empty;
    /// the source drops API items without one.
    pub id: String,

    /// When the event starts.
    pub start: EventTime,

    /// When the event ends.
    pub end: EventTime,

    /// The event title.
    pub summary: Option<String>,

    /// The event description (may contain HTML anchors).
    pub description: Option<String>,

    /// The event location, free text.
    pub location: Option<String>,

    /// The user-chosen event color identifier (e.g. `"5"`).
    pub color_id: Option<String>,

    /// Permalink into the calendar UI.
    pub html_link: Option<String>,

    /// The event status (e.g. "confirmed", "tentative").
    pub status: Option<String>,

    /// Attachments, opaque to this crate.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl RawEvent {
    /// Creates a new raw event with the minimum required fields.
    pub fn new(id: impl Into<String>, start: EventTime, end: EventTime) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            summary: None,
            description: None,
            location: None,
            color_id: None,
            html_link: None,
            status: None,
            attachments: Vec::new(),
        }
    }

    /// Returns true if the event is cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|s| s.eq_ignore_ascii_case("cancelled"))
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the color identifier.
    pub fn with_color_id(mut self, color_id: impl Into<String>) -> Self {
        self.color_id = Some(color_id.into());
        self
    }

    /// Builder method to set the HTML link.
    pub fn with_html_link(mut self, html_link: impl Into<String>) -> Self {
        self.html_link = Some(html_link.into());
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Builder method to add an attachment.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, NaiveDate};

    fn sample_datetime() -> DateTime<FixedOffset> {
        "2025-06-14T10:00:00+10:00".parse().unwrap()
    }

    fn sample_event() -> RawEvent {
        RawEvent::new(
            "evt-123",
            EventTime::from_datetime(sample_datetime()),
            EventTime::from_datetime(sample_datetime()),
        )
    }

    #[test]
    fn raw_event_creation() {
        let event = sample_event();
        assert_eq!(event.id, "evt-123");
        assert!(event.summary.is_none());
        assert!(event.attachments.is_empty());
        assert!(!event.is_cancelled());
    }

    #[test]
    fn raw_event_builder() {
        let event = sample_event()
            .with_summary("Atherton Open")
            .with_description("<a href=\"https://example.com\">flyer</a>")
            .with_location("Kedron Bowl, Brisbane")
            .with_color_id("5")
            .with_html_link("https://calendar.google.com/event?eid=abc")
            .with_status("confirmed");

        assert_eq!(event.summary, Some("Atherton Open".to_string()));
        assert_eq!(event.color_id, Some("5".to_string()));
        assert_eq!(event.location, Some("Kedron Bowl, Brisbane".to_string()));
        assert!(!event.is_cancelled());
    }

    #[test]
    fn cancelled_status_detected() {
        assert!(sample_event().with_status("cancelled").is_cancelled());
        assert!(sample_event().with_status("CANCELLED").is_cancelled());
        assert!(!sample_event().with_status("tentative").is_cancelled());
    }

    #[test]
    fn all_day_event() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        let event = RawEvent::new(
            "evt-allday",
            EventTime::from_date(date),
            EventTime::from_date(date.succ_opt().unwrap()),
        );
        assert!(event.start.is_all_day());
    }

    #[test]
    fn serde_roundtrip() {
        let event = sample_event().with_summary("Test Event").with_color_id("9");
        let json = serde_json::to_string(&event).unwrap();
        let parsed: RawEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }
}
