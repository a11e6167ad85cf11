use std::fmt::Display;

use chrono::{Local, TimeZone};
use seek_core::markup::{self, render_results};
use seek_core::{AppViewModel, ResultEntry, ResultsArea, SearchOutcome};

use super::surface::{ElementId, SurfaceCommand};

pub fn render(view: &AppViewModel) -> Vec<SurfaceCommand> {
    render_in_zone(view, &Local)
}

#[allow(clippy::vec_init_then_push)]
pub fn render_in_zone<Tz>(view: &AppViewModel, tz: &Tz) -> Vec<SurfaceCommand>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut cmds = Vec::new();

    cmds.push(SurfaceCommand::SetText {
        element: ElementId::DocCount,
        text: view.document_count_label(),
    });

    cmds.push(SurfaceCommand::SetVisible {
        element: ElementId::Loading,
        visible: view.loading,
    });

    cmds.push(SurfaceCommand::SetVisible {
        element: ElementId::UploadProgress,
        visible: view.progress.is_some(),
    });
    if let Some(progress) = &view.progress {
        cmds.push(SurfaceCommand::SetProgress {
            width: progress.width(),
            text: progress.text.clone(),
        });
    }

    cmds.push(SurfaceCommand::SetResults {
        generation: view.results_generation,
        query: view.last_query.clone(),
        html: render_results(&view.results, tz),
        summary: summarize(&view.results, view.last_query.as_deref(), tz),
    });

    cmds.push(SurfaceCommand::SyncToasts(view.toasts.clone()));

    cmds.push(SurfaceCommand::ResetFileInput {
        generation: view.file_input_resets,
    });

    cmds
}

fn summarize<Tz>(area: &ResultsArea, query: Option<&str>, tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match area {
        ResultsArea::Blank => Vec::new(),
        ResultsArea::NoResults => vec!["No results found".to_string()],
        ResultsArea::Failed(error) => vec![format!("Search failed: {error}")],
        ResultsArea::Listing(outcome) => {
            let mut lines = vec![listing_header(outcome, query)];
            for (position, entry) in outcome.results.iter().enumerate() {
                lines.extend(format_entry(position + 1, entry, tz));
            }
            lines
        }
    }
}

fn listing_header(outcome: &SearchOutcome, query: Option<&str>) -> String {
    let shown = outcome.results.len();
    let mut header = match query {
        Some(query) => format!("{shown} result(s) for \"{query}\""),
        None => format!("{shown} result(s)"),
    };
    match (outcome.total, outcome.duration_ms) {
        (Some(total), Some(ms)) => header.push_str(&format!(" ({total} total, {ms} ms)")),
        (Some(total), None) => header.push_str(&format!(" ({total} total)")),
        (None, Some(ms)) => header.push_str(&format!(" ({ms} ms)")),
        (None, None) => {}
    }
    header
}

fn format_entry<Tz>(position: usize, entry: &ResultEntry, tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let score = entry
        .relevance_score
        .map(|score| format!(" | Score: {score:.2}"))
        .unwrap_or_default();
    let mut lines = vec![
        format!("[{position}] {}", markup::heading(entry)),
        format!(
            "    Type: {} | Indexed: {}{score}",
            markup::doc_type(entry),
            markup::format_indexed(entry.indexed.as_deref(), tz)
        ),
    ];
    lines.extend(
        entry
            .snippets
            .iter()
            .map(|snippet| format!("    > {}", plain_snippet(snippet))),
    );
    if let Some(url) = &entry.download_url {
        lines.push(format!("    Download: {url}"));
    }
    if let Some(url) = &entry.view_url {
        lines.push(format!("    View: {url}"));
    }
    lines
}

/// Highlight tags become `*` so matches stay visible in plain text.
fn plain_snippet(snippet: &str) -> String {
    snippet
        .replace("<em>", "*")
        .replace("</em>", "*")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use seek_core::{ProgressView, Toast, ToastKind};

    use super::*;

    fn find_results(cmds: &[SurfaceCommand]) -> (&str, &[String]) {
        cmds.iter()
            .find_map(|cmd| match cmd {
                SurfaceCommand::SetResults { html, summary, .. } => {
                    Some((html.as_str(), summary.as_slice()))
                }
                _ => None,
            })
            .expect("results command")
    }

    #[test]
    fn idle_view_hides_loading_and_progress() {
        let cmds = render_in_zone(&AppViewModel::default(), &Utc);

        assert!(cmds.contains(&SurfaceCommand::SetVisible {
            element: ElementId::Loading,
            visible: false
        }));
        assert!(cmds.contains(&SurfaceCommand::SetVisible {
            element: ElementId::UploadProgress,
            visible: false
        }));
        assert!(!cmds
            .iter()
            .any(|cmd| matches!(cmd, SurfaceCommand::SetProgress { .. })));
        assert!(cmds.contains(&SurfaceCommand::SetText {
            element: ElementId::DocCount,
            text: String::new()
        }));
    }

    #[test]
    fn progress_and_toasts_are_forwarded() {
        let toast = Toast {
            id: 3,
            kind: ToastKind::Error,
            text: "Failed to upload a: boom".into(),
        };
        let view = AppViewModel {
            loading: true,
            progress: Some(ProgressView {
                percent: 50.0,
                text: "Uploading 2/4: b".into(),
            }),
            toasts: vec![toast.clone()],
            document_count: Some(9),
            ..AppViewModel::default()
        };
        let cmds = render_in_zone(&view, &Utc);

        assert!(cmds.contains(&SurfaceCommand::SetProgress {
            width: "50%".into(),
            text: "Uploading 2/4: b".into()
        }));
        assert!(cmds.contains(&SurfaceCommand::SyncToasts(vec![toast])));
        assert!(cmds.contains(&SurfaceCommand::SetText {
            element: ElementId::DocCount,
            text: "9".into()
        }));
    }

    #[test]
    fn listing_summary_mentions_query_and_snippets() {
        let view = AppViewModel {
            last_query: Some("rust".into()),
            results: ResultsArea::Listing(SearchOutcome {
                results: vec![ResultEntry {
                    path: Some("a.txt".into()),
                    relevance_score: Some(1.234),
                    snippets: vec!["learn <em>rust</em>\n today".into()],
                    download_url: Some("/d/1".into()),
                    ..ResultEntry::default()
                }],
                total: Some(10),
                duration_ms: Some(4),
            }),
            ..AppViewModel::default()
        };
        let cmds = render_in_zone(&view, &Utc);
        let (html, summary) = find_results(&cmds);

        assert!(html.contains("<h3>a.txt</h3>"));
        assert_eq!(summary[0], "1 result(s) for \"rust\" (10 total, 4 ms)");
        assert_eq!(summary[1], "[1] a.txt");
        assert!(summary[2].ends_with("| Score: 1.23"));
        assert_eq!(summary[3], "    > learn *rust* today");
        assert_eq!(summary[4], "    Download: /d/1");
    }

    #[test]
    fn failure_summary_matches_error_block() {
        let view = AppViewModel {
            results: ResultsArea::Failed("Search failed".into()),
            ..AppViewModel::default()
        };
        let cmds = render_in_zone(&view, &Utc);
        let (html, summary) = find_results(&cmds);

        assert!(html.contains("Search failed: Search failed"));
        assert_eq!(summary.to_vec(), vec!["Search failed: Search failed".to_string()]);
    }
}
