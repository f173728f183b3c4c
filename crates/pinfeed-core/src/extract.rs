//! Text extractors for free-form event fields.
//!
//! Calendar events carry a free-text location and an HTML-ish description.
//! This module pulls out the two pieces the event feed serves: a short venue
//! label and the categorized hyperlinks (the tournament results page vs.
//! any other link).

use std::sync::LazyLock;

use regex::Regex;

use crate::event::EventUrls;

/// Placeholder label for events without a usable location.
pub const NO_LOCATION: &str = "No Location";

/// Substring marking a hyperlink as the results-page link.
pub const RESULTS_MARKER: &str = "tenpinresults";

/// Regex for double-quoted `href` attributes with an http(s) URL.
static HREF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="(https?://[^"]+)""#).expect("Invalid href regex"));

/// Derives the short location label: the first comma-delimited segment of
/// the location, trimmed. Absent or empty input yields [`NO_LOCATION`].
pub fn location_short(location: Option<&str>) -> String {
    match location {
        Some(loc) if !loc.is_empty() => loc.split(',').next().unwrap_or(loc).trim().to_string(),
        _ => NO_LOCATION.to_string(),
    }
}

/// Extracts the categorized hyperlinks from an event description.
///
/// Scans for fully double-quoted `href` attributes whose value starts with
/// `http://` or `https://`. Each match overwrites its slot in document
/// order: URLs containing [`RESULTS_MARKER`] land in the results slot, all
/// others in the other slot, so the last qualifying match of each class
/// wins. No entity decoding or URL validation is performed; the feed
/// carries whatever the description author wrote.
pub fn extract_urls(description: Option<&str>) -> EventUrls {
    let Some(text) = description else {
        return EventUrls::default();
    };

    HREF_REGEX
        .captures_iter(text)
        .fold(EventUrls::default(), |mut urls, caps| {
            let url = caps[1].to_string();
            if url.contains(RESULTS_MARKER) {
                urls.results_link = url;
            } else {
                urls.other_link = url;
            }
            urls
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    mod location {
        use super::*;

        #[test]
        fn takes_first_comma_segment() {
            assert_eq!(
                location_short(Some("Venue A, 123 Main St, Atherton QLD")),
                "Venue A"
            );
        }

        #[test]
        fn trims_surrounding_whitespace() {
            assert_eq!(location_short(Some("  Kedron Bowl , Brisbane")), "Kedron Bowl");
        }

        #[test]
        fn no_comma_returns_whole_string() {
            assert_eq!(location_short(Some("SoloVenue")), "SoloVenue");
        }

        #[test]
        fn absent_returns_placeholder() {
            assert_eq!(location_short(None), NO_LOCATION);
        }

        #[test]
        fn empty_returns_placeholder() {
            assert_eq!(location_short(Some("")), NO_LOCATION);
        }
    }

    mod urls {
        use super::*;

        #[test]
        fn classifies_results_and_other() {
            let desc = r#"<p>Entry form: <a href="https://example.com/entry.pdf">here</a></p>
                <p>Scores: <a href="https://www.tenpinresults.com.au/t/123">results</a></p>"#;

            let urls = extract_urls(Some(desc));
            assert_eq!(urls.results_link, "https://www.tenpinresults.com.au/t/123");
            assert_eq!(urls.other_link, "https://example.com/entry.pdf");
        }

        #[test]
        fn classification_is_order_independent() {
            let desc = r#"<a href="https://tenpinresults.com.au/t/9">a</a>
                <a href="https://example.org/flyer">b</a>"#;

            let urls = extract_urls(Some(desc));
            assert_eq!(urls.results_link, "https://tenpinresults.com.au/t/9");
            assert_eq!(urls.other_link, "https://example.org/flyer");
        }

        #[test]
        fn last_match_wins_per_class() {
            let desc = r#"<a href="https://example.com/first">1</a>
                <a href="https://example.com/second">2</a>"#;

            let urls = extract_urls(Some(desc));
            assert_eq!(urls.other_link, "https://example.com/second");
            assert_eq!(urls.results_link, "");
        }

        #[test]
        fn absent_description_yields_empty_slots() {
            let urls = extract_urls(None);
            assert_eq!(urls.results_link, "");
            assert_eq!(urls.other_link, "");
        }

        #[test]
        fn no_anchors_yields_empty_slots() {
            let urls = extract_urls(Some("Plain text, no links at all."));
            assert_eq!(urls, EventUrls::default());
        }

        #[test]
        fn ignores_unquoted_and_relative_hrefs() {
            let desc = r#"<a href=https://example.com/bare>bare</a>
                <a href="/relative/path">rel</a>
                <a href="ftp://example.com/file">ftp</a>"#;

            let urls = extract_urls(Some(desc));
            assert_eq!(urls, EventUrls::default());
        }

        #[test]
        fn http_scheme_is_accepted() {
            let desc = r#"<a href="http://example.com/plain">x</a>"#;
            assert_eq!(extract_urls(Some(desc)).other_link, "http://example.com/plain");
        }

        #[test]
        fn marker_anywhere_in_url_counts() {
            let desc = r#"<a href="https://mirror.example.com/tenpinresults/archive">x</a>"#;
            assert_eq!(
                extract_urls(Some(desc)).results_link,
                "https://mirror.example.com/tenpinresults/archive"
            );
        }
    }
}
