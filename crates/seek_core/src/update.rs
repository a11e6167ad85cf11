use crate::{AppState, Effect, Msg, StatusReason};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::FetchStatus {
            reason: StatusReason::Startup,
        }],
        Msg::FilesSelected(files) => {
            // One batch at a time; a selection made mid-batch is dropped.
            if files.is_empty() || state.batch_in_progress() {
                return (state, Vec::new());
            }
            vec![state.start_batch(files)]
        }
        Msg::UploadFinished {
            batch,
            index,
            outcome,
        } => {
            if !state.awaiting_upload(batch, index) {
                return (state, Vec::new());
            }
            state.apply_upload_outcome(outcome)
        }
        Msg::StatusLoaded { reason, result } => {
            state.apply_status(reason, result);
            Vec::new()
        }
        Msg::SearchSubmitted(raw) => {
            let query = raw.trim();
            if query.is_empty() {
                return (state, Vec::new());
            }
            state.begin_search(query.to_string());
            vec![Effect::Search {
                query: query.to_string(),
            }]
        }
        Msg::SearchCompleted(result) => {
            // No sequence check: the response that lands last is the one shown.
            state.apply_search(result);
            Vec::new()
        }
        Msg::ToastExpired(id) => {
            state.expire_toast(id);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
