use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use seek_logging::seek_trace;

use crate::{ClientError, SearchResponse, SearchService, StatusReport, UploadReceipt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRequest {
    Status,
    Upload { file_name: String, path: PathBuf },
    Search { query: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientReply {
    Status(Result<StatusReport, ClientError>),
    Upload(Result<UploadReceipt, ClientError>),
    Search(Result<SearchResponse, ClientError>),
}

/// A finished request, carrying back the tag it was submitted with.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientEvent<T> {
    pub tag: T,
    pub reply: ClientReply,
}

/// Runs service calls on a background tokio runtime.
///
/// Requests start in submission order but run concurrently; callers that need
/// ordering submit the next request only after the previous event arrived.
pub struct ClientHandle<T> {
    cmd_tx: mpsc::Sender<(T, ClientRequest)>,
}

impl<T: Send + 'static> ClientHandle<T> {
    pub fn new(
        service: Arc<dyn SearchService>,
        event_tx: mpsc::Sender<ClientEvent<T>>,
    ) -> Result<Self, ClientError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("seek-client")
            .build()
            .map_err(|err| ClientError::Runtime(err.to_string()))?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<(T, ClientRequest)>();

        thread::spawn(move || {
            while let Ok((tag, request)) = cmd_rx.recv() {
                let service = service.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let reply = execute(service.as_ref(), request).await;
                    let _ = event_tx.send(ClientEvent { tag, reply });
                });
            }
            seek_trace!("client command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, tag: T, request: ClientRequest) {
        let _ = self.cmd_tx.send((tag, request));
    }
}

async fn execute(service: &dyn SearchService, request: ClientRequest) -> ClientReply {
    match request {
        ClientRequest::Status => ClientReply::Status(service.status().await),
        ClientRequest::Upload { file_name, path } => {
            ClientReply::Upload(service.upload(&file_name, &path).await)
        }
        ClientRequest::Search { query } => ClientReply::Search(service.search(&query).await),
    }
}
