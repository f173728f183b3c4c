//! Event types for the API's output shape.
//!
//! This module provides the wire-facing types:
//! - [`NormalizedEvent`]: one event after color/contrast/text derivation
//! - [`EventTime`]: a structural copy of the calendar's date-or-datetime
//! - [`EventUrls`]: the categorized hyperlinks pulled from a description
//! - [`Attachment`]: an opaque passthrough of a calendar attachment

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::contrast::TextColor;

/// A calendar event time, preserved in the upstream wire shape.
///
/// Timed events carry an RFC3339 datetime (with its original UTC offset)
/// and optionally an IANA timezone identifier; all-day events carry a bare
/// date. The untagged representation round-trips the JSON the calendar API
/// produced, so normalization is a pure structural copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    /// A specific point in time.
    #[serde(rename_all = "camelCase")]
    DateTime {
        /// RFC3339 datetime with the offset the calendar reported.
        date_time: DateTime<FixedOffset>,
        /// IANA timezone identifier, when the calendar supplied one.
        #[serde(skip_serializing_if = "Option::is_none")]
        time_zone: Option<String>,
    },
    /// An all-day event date.
    Date {
        /// The event date, no time component.
        date: NaiveDate,
    },
}

impl EventTime {
    /// Creates an `EventTime` from a datetime, without a timezone id.
    pub fn from_datetime(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime {
            date_time: dt,
            time_zone: None,
        }
    }

    /// Creates an `EventTime` from a date (all-day event).
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Date { date }
    }

    /// Returns true if this is an all-day event time.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Date { .. })
    }

    /// Builder method to set the timezone identifier.
    pub fn with_time_zone(self, tz: impl Into<String>) -> Self {
        match self {
            Self::DateTime { date_time, .. } => Self::DateTime {
                date_time,
                time_zone: Some(tz.into()),
            },
            date => date,
        }
    }
}

/// An event attachment, passed through unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Link to the attached file.
    pub file_url: String,
    /// Attachment title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// MIME type of the attachment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Icon link for the attachment's file type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_link: Option<String>,
    /// Provider-side file identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
}

/// The categorized hyperlinks extracted from an event description.
///
/// Either slot may be empty when the description carried no qualifying
/// anchor of that class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUrls {
    /// Link to the tournament results page, or empty.
    pub results_link: String,
    /// Any other link from the description, or empty.
    pub other_link: String,
}

/// One calendar event in the API's stable output shape.
///
/// Built once per raw event by the normalization pipeline and serialized
/// straight to the response; a pure function of the raw event plus the
/// static color palette, with no state of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEvent {
    /// Calendar-assigned event identifier, never empty.
    pub id: String,
    /// Event title, `"No Title"` when the calendar had none.
    pub summary: String,
    /// Event start, copied structurally.
    pub start: EventTime,
    /// Event end, copied structurally.
    pub end: EventTime,
    /// Raw location text, empty when absent.
    pub location: String,
    /// Short venue label derived from the location.
    pub location_short: String,
    /// Permalink into the calendar UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
    /// Resolved background color, `#RRGGBB`.
    pub background_color: String,
    /// Legible text color for the background, black or white.
    pub text_color: TextColor,
    /// Categorized hyperlinks from the description.
    pub urls: EventUrls,
    /// Attachments, passed through unmodified.
    pub attachments: Vec<Attachment>,
}
