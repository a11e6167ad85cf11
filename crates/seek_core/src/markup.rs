//! HTML for the results container.
//!
//! Everything coming from the search service is treated as untrusted: text
//! is escaped, snippets keep only the `<em>` highlight tags, and link targets
//! must be http(s) or relative references.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use url::Url;

use crate::{ResultEntry, ResultsArea};

pub const NO_RESULTS_HTML: &str = r#"<div class="no-results">No results found</div>"#;
pub const UNTITLED_DOCUMENT: &str = "Untitled Document";
pub const UNKNOWN_TYPE: &str = "Unknown";
pub const INVALID_DATE: &str = "Invalid Date";

const HIGHLIGHT_OPEN: (&str, &str) = ("&lt;em&gt;", "<em>");
const HIGHLIGHT_CLOSE: (&str, &str) = ("&lt;/em&gt;", "</em>");

/// Renders the inner HTML of the results container.
pub fn render_results<Tz>(area: &ResultsArea, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match area {
        ResultsArea::Blank => String::new(),
        ResultsArea::NoResults => NO_RESULTS_HTML.to_string(),
        ResultsArea::Failed(error) => format!(
            r#"<div class="error">Search failed: {}</div>"#,
            escape_text(error)
        ),
        ResultsArea::Listing(outcome) => outcome
            .results
            .iter()
            .map(|entry| render_entry(entry, tz))
            .collect(),
    }
}

fn render_entry<Tz>(entry: &ResultEntry, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let snippets: String = entry
        .snippets
        .iter()
        .map(|snippet| format!(r#"<div class="snippet">{}</div>"#, escape_snippet(snippet)))
        .collect();

    format!(
        r#"<div class="result-item">
    <h3>{heading}</h3>
    <div class="meta">Type: {doc_type} | Indexed: {indexed}</div>
    {snippets}
    <div class="actions">{download} {view}</div>
</div>
"#,
        heading = escape_text(heading(entry)),
        doc_type = escape_text(doc_type(entry)),
        indexed = escape_text(&format_indexed(entry.indexed.as_deref(), tz)),
        snippets = snippets,
        download = action_link("Download", entry.download_url.as_deref()),
        view = action_link("View", entry.view_url.as_deref()),
    )
}

/// Heading text for a hit; the path, or a placeholder when absent or empty.
pub fn heading(entry: &ResultEntry) -> &str {
    entry
        .path
        .as_deref()
        .filter(|path| !path.is_empty())
        .unwrap_or(UNTITLED_DOCUMENT)
}

/// Document type for a hit, or `Unknown`.
pub fn doc_type(entry: &ResultEntry) -> &str {
    entry
        .doc_type
        .as_deref()
        .filter(|kind| !kind.is_empty())
        .unwrap_or(UNKNOWN_TYPE)
}

fn action_link(label: &str, target: Option<&str>) -> String {
    match target.and_then(safe_href) {
        Some(href) => format!(
            r#"<a href="{href}" target="_blank" rel="noopener noreferrer">{label}</a>"#
        ),
        None => format!(r#"<a class="disabled">{label}</a>"#),
    }
}

/// Formats an RFC 3339 timestamp in the given zone as `M/D/YYYY, h:mm:ss AM`.
pub fn format_indexed<Tz>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    raw.and_then(|value| DateTime::parse_from_rfc3339(value.trim()).ok())
        .map(|stamp| {
            stamp
                .with_timezone(tz)
                .format("%-m/%-d/%Y, %-I:%M:%S %p")
                .to_string()
        })
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escapes a snippet but keeps the search service's `<em>` highlighting.
pub fn escape_snippet(s: &str) -> String {
    escape_text(s)
        .replace(HIGHLIGHT_OPEN.0, HIGHLIGHT_OPEN.1)
        .replace(HIGHLIGHT_CLOSE.0, HIGHLIGHT_CLOSE.1)
}

/// Returns an attribute-safe link target, or `None` when the value is not an
/// http(s) URL or a relative reference.
pub fn safe_href(raw: &str) -> Option<String> {
    let candidate = raw.trim();
    if candidate.is_empty() || candidate.chars().any(char::is_control) {
        return None;
    }
    match Url::parse(candidate) {
        Ok(absolute) => {
            matches!(absolute.scheme(), "http" | "https").then(|| escape_text(candidate))
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("http://relative.invalid/").ok()?;
            base.join(candidate).ok().map(|_| escape_text(candidate))
        }
        Err(_) => None,
    }
}
