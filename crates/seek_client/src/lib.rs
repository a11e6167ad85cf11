//! ShallowSeek client: HTTP access to the search service and a request handle
//! that runs calls off the UI thread.
mod error;
mod handle;
mod service;
mod types;

pub use error::ClientError;
pub use handle::{ClientEvent, ClientHandle, ClientReply, ClientRequest};
pub use service::{
    ReqwestSearchService, SearchService, ServiceSettings, SEARCH_PATH, STATUS_PATH, UPLOAD_FIELD,
    UPLOAD_PATH,
};
pub use types::{SearchHit, SearchResponse, StatusReport, UploadReceipt};
