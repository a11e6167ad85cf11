use chrono::{FixedOffset, Utc};
use seek_core::markup::{render_results, INVALID_DATE, UNKNOWN_TYPE, UNTITLED_DOCUMENT};
use seek_core::{ResultEntry, ResultsArea, SearchOutcome};

fn listing(entries: Vec<ResultEntry>) -> ResultsArea {
    ResultsArea::Listing(SearchOutcome {
        results: entries,
        ..SearchOutcome::default()
    })
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn renders_complete_result_block() {
    let html = render_results(
        &listing(vec![ResultEntry {
            path: Some("a.txt".into()),
            doc_type: Some("text".into()),
            indexed: Some("2024-01-01T00:00:00Z".into()),
            snippets: vec!["hello".into()],
            download_url: Some("/d/1".into()),
            view_url: Some("/v/1".into()),
            ..ResultEntry::default()
        }]),
        &Utc,
    );

    assert!(html.contains("<h3>a.txt</h3>"));
    assert!(html.contains("Type: text | Indexed: 1/1/2024, 12:00:00 AM"));
    assert_eq!(count(&html, r#"<div class="snippet">"#), 1);
    assert!(html.contains(r#"<div class="snippet">hello</div>"#));
    assert!(html.contains(r#"<a href="/d/1" target="_blank" rel="noopener noreferrer">Download</a>"#));
    assert!(html.contains(r#"<a href="/v/1" target="_blank" rel="noopener noreferrer">View</a>"#));
    assert!(!html.contains("No results found"));
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let html = render_results(&listing(vec![ResultEntry::default()]), &Utc);

    assert!(html.contains(&format!("<h3>{UNTITLED_DOCUMENT}</h3>")));
    assert!(html.contains(&format!("Type: {UNKNOWN_TYPE} | Indexed: {INVALID_DATE}")));
    assert_eq!(count(&html, r#"<div class="snippet">"#), 0);
    assert_eq!(count(&html, r#"<a class="disabled">"#), 2);
}

#[test]
fn one_block_per_result_with_snippets_in_order() {
    let html = render_results(
        &listing(vec![
            ResultEntry {
                path: Some("one.txt".into()),
                snippets: vec!["first".into(), "second".into()],
                ..ResultEntry::default()
            },
            ResultEntry {
                path: Some("two.pdf".into()),
                ..ResultEntry::default()
            },
        ]),
        &Utc,
    );

    assert_eq!(count(&html, r#"<div class="result-item">"#), 2);
    let first = html.find("first").expect("first snippet");
    let second = html.find("second").expect("second snippet");
    assert!(first < second);
    assert!(html.find("one.txt") < html.find("two.pdf"));
}

#[test]
fn untrusted_fields_are_escaped() {
    let html = render_results(
        &listing(vec![ResultEntry {
            path: Some("<img src=x onerror=alert(1)>.txt".into()),
            doc_type: Some("\"pdf\"".into()),
            snippets: vec!["a <em>match</em> & <b>more</b>".into()],
            download_url: Some("javascript:alert(1)".into()),
            view_url: Some("/v/1\" onclick=\"x".into()),
            ..ResultEntry::default()
        }]),
        &Utc,
    );

    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;.txt"));
    assert!(html.contains("Type: &quot;pdf&quot;"));
    assert!(html.contains("a <em>match</em> &amp; &lt;b&gt;more&lt;/b&gt;"));
    assert!(!html.contains("javascript:"));
    assert!(html.contains(r#"href="/v/1&quot; onclick=&quot;x""#));
}

#[test]
fn indexed_date_follows_viewer_zone() {
    let plus_two = FixedOffset::east_opt(2 * 3600).expect("valid offset");
    let html = render_results(
        &listing(vec![ResultEntry {
            indexed: Some("2024-01-01T23:30:00Z".into()),
            ..ResultEntry::default()
        }]),
        &plus_two,
    );

    assert!(html.contains("Indexed: 1/2/2024, 1:30:00 AM"));
}

#[test]
fn blank_area_renders_nothing() {
    assert_eq!(render_results(&ResultsArea::Blank, &Utc), "");
}
