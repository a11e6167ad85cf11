//! ShallowSeek core: pure state machine, view model, and results markup.
mod effect;
pub mod markup;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, BatchId, FileHandle, ResultEntry, ResultsArea, SearchOutcome, StatusReason, Toast,
    ToastId, ToastKind, UploadOutcome, DEFAULT_TOAST_TTL,
};
pub use update::update;
pub use view_model::{AppViewModel, ProgressView};
