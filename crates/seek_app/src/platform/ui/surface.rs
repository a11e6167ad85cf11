use seek_core::Toast;

/// UI elements the controller drives, named after the page's element ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementId {
    FileInput,
    Results,
    DocCount,
    Loading,
    UploadProgress,
}

impl ElementId {
    pub fn dom_id(self) -> &'static str {
        match self {
            ElementId::FileInput => "fileInput",
            ElementId::Results => "results",
            ElementId::DocCount => "docCount",
            ElementId::Loading => "loading",
            ElementId::UploadProgress => "uploadProgress",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    SetVisible {
        element: ElementId,
        visible: bool,
    },
    /// Progress fill width (CSS value) and caption.
    SetProgress { width: String, text: String },
    SetText { element: ElementId, text: String },
    /// Replaces the results container. `summary` is a plain-text rendition;
    /// `generation` increases with every completed search.
    SetResults {
        generation: u64,
        query: Option<String>,
        html: String,
        summary: Vec<String>,
    },
    /// The full set of toasts that should currently be visible.
    SyncToasts(Vec<Toast>),
    /// Clears the file selection; `generation` increases on every reset.
    ResetFileInput { generation: u64 },
    Notice(String),
}

/// Something that can show the UI. Commands describe the complete current
/// state, so applying the same commands twice must be harmless.
pub trait Surface {
    fn apply(&mut self, commands: Vec<SurfaceCommand>);
}
