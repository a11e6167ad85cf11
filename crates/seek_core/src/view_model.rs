use crate::{ResultsArea, Toast};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub loading: bool,
    pub progress: Option<ProgressView>,
    pub uploading: bool,
    pub toasts: Vec<Toast>,
    pub results: ResultsArea,
    /// Bumped every time a search completes, even with identical results.
    pub results_generation: u64,
    pub last_query: Option<String>,
    pub document_count: Option<u64>,
    /// Bumped every time the file selection must be cleared.
    pub file_input_resets: u64,
}

impl AppViewModel {
    /// Text for the document counter; blank until the first status answer.
    pub fn document_count_label(&self) -> String {
        self.document_count
            .map(|count| count.to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    /// Share of the batch already sent, in percent.
    pub percent: f64,
    pub text: String,
}

impl ProgressView {
    /// CSS width value for the progress fill.
    pub fn width(&self) -> String {
        format!("{}%", self.percent)
    }
}
