//! Channel message types for communication between the UI thread and the
//! API worker task. All types are plain data — no HTTP handles cross the
//! channel boundary, keeping the TUI thread free of network concerns.

use std::fmt;

use chrono::Datelike;
use serde::Deserialize;

// ─── Sections ───────────────────────────────────────────────────────────────

/// The four movie list views. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Daily,
    Hot,
    Upcoming,
    Preference,
}

impl Section {
    /// Display order, left to right in the tab bar.
    pub const ALL: [Section; 4] = [
        Section::Daily,
        Section::Hot,
        Section::Upcoming,
        Section::Preference,
    ];

    /// Tab label.
    pub fn title(self) -> &'static str {
        match self {
            Section::Daily => "Today's Picks",
            Section::Hot => "Hot Now",
            Section::Upcoming => "Upcoming",
            Section::Preference => "For You",
        }
    }

    /// Backend endpoint path for the section's list.
    pub fn endpoint(self) -> &'static str {
        match self {
            Section::Daily => "/api/movies/daily",
            Section::Hot => "/api/movies/hot",
            Section::Upcoming => "/api/movies/upcoming",
            Section::Preference => "/api/movies/recommend",
        }
    }

    /// Stable index for per-section state arrays.
    pub fn index(self) -> usize {
        match self {
            Section::Daily => 0,
            Section::Hot => 1,
            Section::Upcoming => 2,
            Section::Preference => 3,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ─── Movie payload ──────────────────────────────────────────────────────────

/// Placeholder poster URL for cards when the backend sends none (or a value
/// that is not a usable URL).
pub const CARD_POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/200x300?text=No+Poster";

/// Larger placeholder variant used in the detail overlay.
pub const DETAIL_POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/400x600?text=No+Poster";

/// Shown in the detail overlay when a movie carries no overview text.
pub const NO_OVERVIEW: &str = "No overview available.";

/// One movie as the backend sends it. Read-only display state: nothing here
/// is ever mutated, and each load replaces a section's list wholesale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl Movie {
    /// Poster URL with the fallback rule applied: absent or non-http(s)
    /// values resolve to the given placeholder.
    pub fn poster_url<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.poster.as_deref() {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => url,
            _ => placeholder,
        }
    }

    /// Rating formatted to exactly one decimal place, or "N/A".
    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(r) => format!("{r:.1}"),
            None => "N/A".to_string(),
        }
    }

    /// Calendar year derived from `release_date`, empty when absent or
    /// unparseable. Cards show the year only.
    pub fn release_year(&self) -> String {
        let Some(date) = self.release_date.as_deref() else {
            return String::new();
        };
        if let Ok(parsed) = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            return parsed.year().to_string();
        }
        // "ISO-like" covers bare years and other prefixes; take a leading
        // four-digit year if one is there.
        if date.len() >= 4 && date.as_bytes()[..4].iter().all(u8::is_ascii_digit) {
            return date[..4].to_string();
        }
        String::new()
    }

    /// Verbatim release date for the detail overlay, "unknown" when absent.
    pub fn release_date_label(&self) -> &str {
        match self.release_date.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => "unknown",
        }
    }

    /// Overview text for the detail overlay.
    pub fn overview_text(&self) -> &str {
        match self.overview.as_deref() {
            Some(o) if !o.is_empty() => o,
            _ => NO_OVERVIEW,
        }
    }

    /// Provenance label for the detail overlay.
    pub fn source_label(&self) -> &str {
        self.source.as_deref().unwrap_or("unknown")
    }
}

/// The `{success, movies}` wrapper every list endpoint returns.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub movies: Vec<Movie>,
    /// Backend error detail on `success: false`. Logged, never displayed.
    #[serde(default)]
    pub error: Option<String>,
}

// ─── Load failures ──────────────────────────────────────────────────────────

/// How a section load failed. Decides the inline message only — both kinds
/// share the same recovery path (user re-triggers the load).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// Transport failure or a body that did not parse as the envelope.
    Network,
    /// The envelope parsed but carried `success: false`.
    Backend,
}

impl LoadError {
    pub fn message(self) -> &'static str {
        match self {
            LoadError::Network => "Network error, check your connection",
            LoadError::Backend => "Load failed, try again later",
        }
    }
}

/// Classify a raw response body. The original client never consults the
/// HTTP status: the backend sends its `success:false` envelope with a 500,
/// so an unparseable body is the only thing treated as a network problem.
pub fn decode_envelope(body: &[u8]) -> Result<Vec<Movie>, LoadError> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(|_| LoadError::Network)?;
    if envelope.success {
        Ok(envelope.movies)
    } else {
        if let Some(detail) = envelope.error {
            tracing::warn!("Backend refused the request: {detail}");
        }
        Err(LoadError::Backend)
    }
}

// ─── UI → Worker commands ───────────────────────────────────────────────────

/// Commands sent from the TUI main loop to the async API worker.
#[derive(Debug, Clone)]
pub enum ApiCommand {
    /// Fetch a GET section's movie list.
    FetchSection(Section),
    /// POST the checked genres to the recommendation endpoint.
    Recommend(Vec<String>),
}

// ─── Worker → UI events ─────────────────────────────────────────────────────

/// Events emitted by the API worker back to the TUI.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    /// A section's list arrived, in response order.
    SectionLoaded {
        section: Section,
        movies: Vec<Movie>,
    },
    /// A section load failed; the section shows the matching inline message.
    SectionFailed {
        section: Section,
        error: LoadError,
    },
    /// Catch-all worker error surfaced as a transient popup.
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(json: &str) -> Movie {
        serde_json::from_str(json).expect("movie should deserialize")
    }

    #[test]
    fn poster_falls_back_when_absent() {
        let m = movie(r#"{"title": "Heat"}"#);
        assert_eq!(m.poster_url(CARD_POSTER_PLACEHOLDER), CARD_POSTER_PLACEHOLDER);
    }

    #[test]
    fn poster_falls_back_when_not_a_url() {
        let m = movie(r#"{"title": "Heat", "poster": "not a url"}"#);
        assert_eq!(
            m.poster_url(DETAIL_POSTER_PLACEHOLDER),
            DETAIL_POSTER_PLACEHOLDER
        );
    }

    #[test]
    fn poster_passes_through_when_usable() {
        let m = movie(r#"{"title": "Heat", "poster": "https://img.example/w500/heat.jpg"}"#);
        assert_eq!(
            m.poster_url(CARD_POSTER_PLACEHOLDER),
            "https://img.example/w500/heat.jpg"
        );
    }

    #[test]
    fn rating_formats_to_one_decimal() {
        let m = movie(r#"{"title": "Heat", "rating": 8.25}"#);
        assert_eq!(m.rating_label(), "8.2");
        let m = movie(r#"{"title": "Heat", "rating": 7.0}"#);
        assert_eq!(m.rating_label(), "7.0");
    }

    #[test]
    fn rating_absent_is_na() {
        let m = movie(r#"{"title": "Heat"}"#);
        assert_eq!(m.rating_label(), "N/A");
    }

    #[test]
    fn release_year_from_iso_date() {
        let m = movie(r#"{"title": "Heat", "release_date": "1995-12-15"}"#);
        assert_eq!(m.release_year(), "1995");
    }

    #[test]
    fn release_year_from_bare_year() {
        let m = movie(r#"{"title": "Heat", "release_date": "1995"}"#);
        assert_eq!(m.release_year(), "1995");
    }

    #[test]
    fn release_year_empty_when_absent_or_garbage() {
        assert_eq!(movie(r#"{"title": "Heat"}"#).release_year(), "");
        let m = movie(r#"{"title": "Heat", "release_date": "someday"}"#);
        assert_eq!(m.release_year(), "");
    }

    #[test]
    fn detail_labels_fall_back() {
        let m = movie(r#"{"title": "Heat", "release_date": "", "overview": ""}"#);
        assert_eq!(m.release_date_label(), "unknown");
        assert_eq!(m.overview_text(), NO_OVERVIEW);
        assert_eq!(m.source_label(), "unknown");

        let m = movie(
            r#"{"title": "Heat", "release_date": "1995-12-15",
                "overview": "A thief and a cop.", "source": "TMDB"}"#,
        );
        assert_eq!(m.release_date_label(), "1995-12-15");
        assert_eq!(m.overview_text(), "A thief and a cop.");
        assert_eq!(m.source_label(), "TMDB");
    }

    #[test]
    fn decode_preserves_response_order() {
        let body = br#"{"success": true, "movies": [
            {"title": "C"}, {"title": "A"}, {"title": "B"}
        ]}"#;
        let movies = decode_envelope(body).expect("envelope should decode");
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["C", "A", "B"]);
    }

    #[test]
    fn decode_success_false_is_backend_error() {
        let body = br#"{"success": false, "error": "TMDB quota exceeded"}"#;
        assert_eq!(decode_envelope(body), Err(LoadError::Backend));
    }

    #[test]
    fn decode_garbage_is_network_error() {
        assert_eq!(decode_envelope(b"<html>502</html>"), Err(LoadError::Network));
        assert_eq!(decode_envelope(b""), Err(LoadError::Network));
    }

    #[test]
    fn decode_tolerates_missing_movies_field() {
        let movies = decode_envelope(br#"{"success": true}"#).expect("should decode");
        assert!(movies.is_empty());
    }

    #[test]
    fn section_endpoints_match_backend_routes() {
        assert_eq!(Section::Daily.endpoint(), "/api/movies/daily");
        assert_eq!(Section::Hot.endpoint(), "/api/movies/hot");
        assert_eq!(Section::Upcoming.endpoint(), "/api/movies/upcoming");
        assert_eq!(Section::Preference.endpoint(), "/api/movies/recommend");
    }

    #[test]
    fn section_indices_are_stable_and_distinct() {
        for (i, section) in Section::ALL.iter().enumerate() {
            assert_eq!(section.index(), i);
        }
    }
}
