use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::view_model::{AppViewModel, ProgressView};
use crate::Effect;

pub type BatchId = u64;
pub type ToastId = u64;

/// How long a toast stays on screen unless configured otherwise.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(3);

/// A user-selected file: display name plus where to read it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub path: PathBuf,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Uses the final path component as the display name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { name, path }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub text: String,
}

/// Why a status fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusReason {
    Startup,
    AfterUpload(BatchId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded,
    Failed(String),
}

/// One search hit as received from the service. Every field may be absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultEntry {
    pub id: Option<String>,
    pub path: Option<String>,
    pub doc_type: Option<String>,
    pub indexed: Option<String>,
    pub relevance_score: Option<f64>,
    pub snippets: Vec<String>,
    pub download_url: Option<String>,
    pub view_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchOutcome {
    pub results: Vec<ResultEntry>,
    pub total: Option<u64>,
    pub duration_ms: Option<u64>,
}

/// What the results container currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsArea {
    #[default]
    Blank,
    NoResults,
    Failed(String),
    Listing(SearchOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct UploadBatch {
    id: BatchId,
    files: Vec<FileHandle>,
    current: usize,
    succeeded: usize,
    failed: usize,
    refreshing_count: bool,
}

impl UploadBatch {
    fn progress(&self) -> ProgressView {
        let total = self.files.len();
        let percent = (self.current as f64 / total as f64) * 100.0;
        let text = format!(
            "Uploading {}/{}: {}",
            self.current + 1,
            total,
            self.files[self.current].name
        );
        ProgressView { percent, text }
    }

    fn current_file(&self) -> &FileHandle {
        &self.files[self.current]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    dirty: bool,
    loading: bool,
    batch: Option<UploadBatch>,
    next_batch_id: BatchId,
    toasts: Vec<Toast>,
    next_toast_id: ToastId,
    toast_ttl: Duration,
    results: ResultsArea,
    results_generation: u64,
    last_query: Option<String>,
    document_count: Option<u64>,
    file_input_resets: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_toast_ttl(DEFAULT_TOAST_TTL)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toast_ttl(toast_ttl: Duration) -> Self {
        Self {
            dirty: false,
            loading: false,
            batch: None,
            next_batch_id: 1,
            toasts: Vec::new(),
            next_toast_id: 1,
            toast_ttl,
            results: ResultsArea::Blank,
            results_generation: 0,
            last_query: None,
            document_count: None,
            file_input_resets: 0,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            loading: self.loading,
            progress: self
                .batch
                .as_ref()
                .map(UploadBatch::progress),
            uploading: self.batch.is_some(),
            toasts: self.toasts.clone(),
            results: self.results.clone(),
            results_generation: self.results_generation,
            last_query: self.last_query.clone(),
            document_count: self.document_count,
            file_input_resets: self.file_input_resets,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn batch_in_progress(&self) -> bool {
        self.batch.is_some()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn push_toast(&mut self, kind: ToastKind, text: String) -> Effect {
        let id = self.next_toast_id;
        self.next_toast_id += 1;
        self.toasts.push(Toast { id, kind, text });
        self.mark_dirty();
        Effect::ExpireToast {
            toast_id: id,
            after: self.toast_ttl,
        }
    }

    pub(crate) fn expire_toast(&mut self, id: ToastId) {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        if self.toasts.len() != before {
            self.mark_dirty();
        }
    }

    /// Starts a batch and returns the upload effect for its first file.
    /// Callers guarantee `files` is non-empty and no batch is live.
    pub(crate) fn start_batch(&mut self, files: Vec<FileHandle>) -> Effect {
        let id = self.next_batch_id;
        self.next_batch_id += 1;
        let first = files[0].clone();
        self.batch = Some(UploadBatch {
            id,
            files,
            current: 0,
            succeeded: 0,
            failed: 0,
            refreshing_count: false,
        });
        self.loading = true;
        self.mark_dirty();
        Effect::UploadFile {
            batch: id,
            index: 0,
            file: first,
        }
    }

    /// True when `(batch, index)` names the upload currently in flight.
    pub(crate) fn awaiting_upload(&self, batch: BatchId, index: usize) -> bool {
        self.batch
            .as_ref()
            .is_some_and(|b| b.id == batch && b.current == index && !b.refreshing_count)
    }

    /// Records the outcome of the in-flight upload and returns follow-up effects:
    /// toast expiries plus either the next upload or the status refresh.
    pub(crate) fn apply_upload_outcome(&mut self, outcome: UploadOutcome) -> Vec<Effect> {
        let Some(batch) = self.batch.as_mut() else {
            return Vec::new();
        };
        let name = batch.current_file().name.clone();
        let toast = match outcome {
            UploadOutcome::Uploaded => {
                batch.succeeded += 1;
                (ToastKind::Success, format!("Successfully uploaded {name}"))
            }
            UploadOutcome::Failed(error) => {
                batch.failed += 1;
                (ToastKind::Error, format!("Failed to upload {name}: {error}"))
            }
        };

        let next = if batch.current + 1 < batch.files.len() {
            batch.current += 1;
            Some(Effect::UploadFile {
                batch: batch.id,
                index: batch.current,
                file: batch.current_file().clone(),
            })
        } else {
            batch.refreshing_count = true;
            None
        };
        let (batch_id, succeeded, failed) = (batch.id, batch.succeeded, batch.failed);

        let mut effects = vec![self.push_toast(toast.0, toast.1)];
        match next {
            Some(upload) => effects.push(upload),
            None => {
                if succeeded > 0 {
                    effects.push(self.push_toast(
                        ToastKind::Success,
                        format!("Successfully uploaded {succeeded} file(s)"),
                    ));
                }
                if failed > 0 {
                    effects.push(self.push_toast(
                        ToastKind::Error,
                        format!("Failed to upload {failed} file(s)"),
                    ));
                }
                effects.push(Effect::FetchStatus {
                    reason: StatusReason::AfterUpload(batch_id),
                });
            }
        }
        self.mark_dirty();
        effects
    }

    pub(crate) fn apply_status(&mut self, reason: StatusReason, result: Result<u64, String>) {
        if let Ok(count) = result {
            if self.document_count != Some(count) {
                self.document_count = Some(count);
                self.mark_dirty();
            }
        }

        if let StatusReason::AfterUpload(batch_id) = reason {
            let finishing = self
                .batch
                .as_ref()
                .is_some_and(|b| b.id == batch_id && b.refreshing_count);
            if finishing {
                self.batch = None;
                self.loading = false;
                self.file_input_resets += 1;
                self.mark_dirty();
            }
        }
    }

    pub(crate) fn begin_search(&mut self, query: String) {
        self.loading = true;
        self.last_query = Some(query);
        self.mark_dirty();
    }

    pub(crate) fn apply_search(&mut self, result: Result<SearchOutcome, String>) {
        self.results = match result {
            Ok(outcome) if outcome.results.is_empty() => ResultsArea::NoResults,
            Ok(outcome) => ResultsArea::Listing(outcome),
            Err(error) => ResultsArea::Failed(error),
        };
        self.results_generation += 1;
        self.loading = false;
        self.mark_dirty();
    }
}
