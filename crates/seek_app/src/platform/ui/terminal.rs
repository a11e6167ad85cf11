use std::collections::BTreeSet;
use std::io::Write;

use seek_core::{Toast, ToastId, ToastKind};
use seek_logging::{seek_debug, seek_error, seek_info};

use super::constants::PROGRESS_BAR_CELLS;
use super::surface::{ElementId, Surface, SurfaceCommand};
use crate::platform::export::ResultsExporter;

/// Prints UI changes to a terminal. Only differences from the previously
/// applied state are written.
pub struct TerminalSurface<W: Write> {
    out: W,
    exporter: Option<ResultsExporter>,
    loading: bool,
    progress_visible: bool,
    progress_text: Option<String>,
    doc_count: String,
    results_generation: Option<u64>,
    visible_toasts: BTreeSet<ToastId>,
    file_input_generation: u64,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, exporter: Option<ResultsExporter>) -> Self {
        Self {
            out,
            exporter,
            loading: false,
            progress_visible: false,
            progress_text: None,
            doc_count: String::new(),
            results_generation: None,
            visible_toasts: BTreeSet::new(),
            file_input_generation: 0,
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            seek_error!("Failed to write to terminal: {}", err);
        }
    }

    fn set_visible(&mut self, element: ElementId, visible: bool) {
        match element {
            ElementId::Loading => {
                if visible && !self.loading {
                    self.line("Loading...");
                }
                self.loading = visible;
            }
            ElementId::UploadProgress => {
                if !visible {
                    self.progress_text = None;
                }
                self.progress_visible = visible;
            }
            other => seek_debug!("visibility of {} is not shown", other.dom_id()),
        }
    }

    fn set_progress(&mut self, width: String, text: String) {
        if !self.progress_visible || self.progress_text.as_deref() == Some(text.as_str()) {
            return;
        }
        let bar = progress_bar(&width);
        self.line(&format!("{bar} {text}"));
        self.progress_text = Some(text);
    }

    fn set_text(&mut self, element: ElementId, text: String) {
        if element != ElementId::DocCount || text == self.doc_count {
            return;
        }
        if let Ok(count) = text.parse::<u64>() {
            self.line(&format!("Documents indexed: {}", format_with_commas(count)));
        }
        self.doc_count = text;
    }

    fn set_results(
        &mut self,
        generation: u64,
        query: Option<String>,
        html: String,
        summary: Vec<String>,
    ) {
        if self.results_generation == Some(generation) {
            return;
        }
        for line in &summary {
            self.line(line);
        }
        if let Some(exporter) = &self.exporter {
            match exporter.write_page(query.as_deref(), &self.doc_count, &html) {
                Ok(path) => seek_info!("Results page written to {:?}", path),
                Err(err) => seek_error!("Failed to write results page: {}", err),
            }
        }
        self.results_generation = Some(generation);
    }

    fn sync_toasts(&mut self, toasts: Vec<Toast>) {
        let current: BTreeSet<ToastId> = toasts.iter().map(|toast| toast.id).collect();
        for toast in toasts {
            if self.visible_toasts.contains(&toast.id) {
                continue;
            }
            let marker = match toast.kind {
                ToastKind::Success => "[ok]",
                ToastKind::Error => "[error]",
            };
            self.line(&format!("{marker} {}", toast.text));
        }
        for gone in self.visible_toasts.difference(&current) {
            seek_debug!("toast {} dismissed", gone);
        }
        self.visible_toasts = current;
    }

    fn reset_file_input(&mut self, generation: u64) {
        if generation > self.file_input_generation {
            seek_debug!("file selection cleared ({})", generation);
            self.file_input_generation = generation;
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn apply(&mut self, commands: Vec<SurfaceCommand>) {
        for command in commands {
            match command {
                SurfaceCommand::SetVisible { element, visible } => {
                    self.set_visible(element, visible)
                }
                SurfaceCommand::SetProgress { width, text } => self.set_progress(width, text),
                SurfaceCommand::SetText { element, text } => self.set_text(element, text),
                SurfaceCommand::SetResults {
                    generation,
                    query,
                    html,
                    summary,
                } => self.set_results(generation, query, html, summary),
                SurfaceCommand::SyncToasts(toasts) => self.sync_toasts(toasts),
                SurfaceCommand::ResetFileInput { generation } => self.reset_file_input(generation),
                SurfaceCommand::Notice(text) => self.line(&text),
            }
        }
        if let Err(err) = self.out.flush() {
            seek_error!("Failed to flush terminal: {}", err);
        }
    }
}

/// Draws `[#####...............]` for a CSS width such as `25%`.
fn progress_bar(width: &str) -> String {
    let percent = width
        .trim_end_matches('%')
        .parse::<f64>()
        .unwrap_or(0.0)
        .clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * PROGRESS_BAR_CELLS as f64).floor() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        ".".repeat(PROGRESS_BAR_CELLS - filled),
        percent
    )
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
