//! Google Calendar API client.
//!
//! A low-level HTTP client for the events.list endpoint of the Calendar API
//! v3: request building, status mapping, and conversion of API items into
//! [`RawEvent`]s.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use pinfeed_core::{Attachment, EventTime};

use crate::error::{SourceError, SourceResult};
use crate::raw_event::RawEvent;

/// Base URL for Google Calendar API v3.
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar API client.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
    access_token: String,
}

impl GoogleCalendarClient {
    /// Creates a new client with the given access token.
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            access_token: access_token.into(),
        })
    }

    /// Updates the access token (after refresh).
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = token.into();
    }

    /// Lists one page of events from a calendar, ordered by start time.
    ///
    /// # Arguments
    ///
    /// * `calendar_id` - The calendar identifier
    /// * `time_min` - Lower bound for event start time
    /// * `max_results` - Page size cap
    /// * `single_events` - Whether to expand recurring events
    pub async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        max_results: usize,
        single_events: bool,
    ) -> SourceResult<Vec<RawEvent>> {
        let url = format!(
            "{}/calendars/{}/events",
            CALENDAR_API_BASE,
            urlencoding::encode(calendar_id)
        );

        let request = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("timeMin", time_min.to_rfc3339()),
                ("singleEvents", single_events.to_string()),
                ("orderBy", "startTime".to_string()),
                ("maxResults", max_results.to_string()),
            ]);

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::network("request timeout")
            } else if e.is_connect() {
                SourceError::network(format!("connection failed: {}", e))
            } else {
                SourceError::network(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(SourceError::rate_limited(format!(
                "rate limit exceeded{}",
                retry_after
                    .map(|s| format!(", retry after {} seconds", s))
                    .unwrap_or_default()
            )));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SourceError::authentication(
                "access token expired or invalid",
            ));
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(SourceError::authorization("access denied to calendar"));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::server(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::network(format!("failed to read response: {}", e)))?;

        let list_response: EventListResponse = serde_json::from_str(&body)
            .map_err(|e| SourceError::invalid_response(format!("failed to parse response: {}", e)))?;

        let events: Vec<RawEvent> = list_response
            .items
            .into_iter()
            .filter_map(convert_event)
            .collect();

        debug!(
            "fetched {} events from calendar {}",
            events.len(),
            calendar_id
        );
        Ok(events)
    }
}

/// Converts a Calendar API event to a [`RawEvent`].
///
/// Cancelled items and items without an id or parseable start/end are
/// dropped with a warning rather than failing the whole page.
fn convert_event(event: ApiEvent) -> Option<RawEvent> {
    if event.status.as_deref() == Some("cancelled") {
        return None;
    }

    let id = event.id.filter(|id| !id.is_empty())?;

    let start = convert_time(event.start, &id, "start")?;
    let end = convert_time(event.end, &id, "end")?;

    let attachments = event
        .attachments
        .unwrap_or_default()
        .into_iter()
        .map(|a| Attachment {
            file_url: a.file_url.unwrap_or_default(),
            title: a.title,
            mime_type: a.mime_type,
            icon_link: a.icon_link,
            file_id: a.file_id,
        })
        .collect();

    let mut raw = RawEvent::new(id, start, end);
    raw.summary = event.summary;
    raw.description = event.description;
    raw.location = event.location;
    raw.color_id = event.color_id;
    raw.html_link = event.html_link;
    raw.status = event.status;
    raw.attachments = attachments;

    Some(raw)
}

fn convert_time(time: Option<ApiEventTime>, id: &str, which: &str) -> Option<EventTime> {
    let Some(time) = time else {
        warn!("event {} has no {} time", id, which);
        return None;
    };

    match (time.date_time, time.date) {
        (Some(dt), _) => {
            let parsed = DateTime::parse_from_rfc3339(&dt)
                .map_err(|e| warn!("event {}: failed to parse {} time: {}", id, which, e))
                .ok()?;
            let mut converted = EventTime::from_datetime(parsed);
            if let Some(tz) = time.time_zone {
                converted = converted.with_time_zone(tz);
            }
            Some(converted)
        }
        (None, Some(date)) => {
            let parsed = chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| warn!("event {}: failed to parse {} date: {}", id, which, e))
                .ok()?;
            Some(EventTime::from_date(parsed))
        }
        (None, None) => {
            warn!("event {} has no {} time", id, which);
            None
        }
    }
}

/// Response from the events.list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventListResponse {
    #[serde(default)]
    items: Vec<ApiEvent>,
}

/// A single event from the Calendar API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEvent {
    id: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    location: Option<String>,
    color_id: Option<String>,
    start: Option<ApiEventTime>,
    end: Option<ApiEventTime>,
    html_link: Option<String>,
    status: Option<String>,
    attachments: Option<Vec<ApiAttachment>>,
}

/// Event time from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEventTime {
    date: Option<String>,
    date_time: Option<String>,
    time_zone: Option<String>,
}

/// Attachment from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiAttachment {
    file_url: Option<String>,
    title: Option<String>,
    mime_type: Option<String>,
    icon_link: Option<String>,
    file_id: Option<String>,
}
