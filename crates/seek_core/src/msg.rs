use crate::{BatchId, FileHandle, SearchOutcome, StatusReason, ToastId, UploadOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Front-end finished setting up its surface.
    Started,
    /// User picked files for upload.
    FilesSelected(Vec<FileHandle>),
    /// Upload request for one file of a batch completed.
    UploadFinished {
        batch: BatchId,
        index: usize,
        outcome: UploadOutcome,
    },
    /// Status endpoint answered (document count) or failed.
    StatusLoaded {
        reason: StatusReason,
        result: Result<u64, String>,
    },
    /// User submitted the search form with the raw input text.
    SearchSubmitted(String),
    /// Search request completed. Error text is shown as-is.
    SearchCompleted(Result<SearchOutcome, String>),
    /// Toast display time elapsed.
    ToastExpired(ToastId),
    /// Fallback for placeholder wiring.
    NoOp,
}
