use std::time::Duration;

use crate::{BatchId, FileHandle, StatusReason, ToastId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// GET the status endpoint; the answer comes back as `Msg::StatusLoaded`.
    FetchStatus { reason: StatusReason },
    /// POST one file; the answer comes back as `Msg::UploadFinished`.
    UploadFile {
        batch: BatchId,
        index: usize,
        file: FileHandle,
    },
    /// GET the search endpoint with an already trimmed, non-empty query.
    Search { query: String },
    /// Post `Msg::ToastExpired` once `after` has elapsed.
    ExpireToast { toast_id: ToastId, after: Duration },
}
