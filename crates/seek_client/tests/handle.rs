use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use seek_client::{
    ClientError, ClientEvent, ClientHandle, ClientReply, ClientRequest, SearchHit, SearchResponse,
    SearchService, StatusReport, UploadReceipt,
};

/// In-memory service that records calls and fails uploads of `*.bad` files.
#[derive(Default)]
struct FakeService {
    calls: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl SearchService for FakeService {
    async fn status(&self) -> Result<StatusReport, ClientError> {
        self.calls.lock().unwrap().push("status".into());
        Ok(StatusReport {
            documents: Some(5.into()),
            ..StatusReport::default()
        })
    }

    async fn upload(&self, file_name: &str, _path: &Path) -> Result<UploadReceipt, ClientError> {
        self.calls.lock().unwrap().push(format!("upload {file_name}"));
        if file_name.ends_with(".bad") {
            return Err(ClientError::UploadRejected {
                status: 400,
                body: "nope".into(),
            });
        }
        Ok(UploadReceipt {
            status: 200,
            body: "ok".into(),
        })
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, ClientError> {
        self.calls.lock().unwrap().push(format!("search {query}"));
        Ok(SearchResponse {
            results: Some(vec![SearchHit {
                path: Some(format!("{query}.txt")),
                ..SearchHit::default()
            }]),
            ..SearchResponse::default()
        })
    }
}

fn next_event(rx: &mpsc::Receiver<ClientEvent<u32>>) -> ClientEvent<u32> {
    rx.recv_timeout(Duration::from_secs(5)).expect("client event")
}

#[test]
fn replies_carry_their_tag() {
    let service = Arc::new(FakeService::default());
    let (event_tx, event_rx) = mpsc::channel();
    let handle = ClientHandle::new(service.clone(), event_tx).expect("handle");

    handle.submit(7, ClientRequest::Status);
    let event = next_event(&event_rx);
    assert_eq!(event.tag, 7);
    match event.reply {
        ClientReply::Status(Ok(report)) => assert_eq!(report.document_count(), 5),
        other => panic!("unexpected reply {other:?}"),
    }

    handle.submit(
        8,
        ClientRequest::Upload {
            file_name: "x.bad".into(),
            path: PathBuf::from("/tmp/x.bad"),
        },
    );
    let event = next_event(&event_rx);
    assert_eq!(event.tag, 8);
    assert_eq!(
        event.reply,
        ClientReply::Upload(Err(ClientError::UploadRejected {
            status: 400,
            body: "nope".into()
        }))
    );
}

#[test]
fn search_reply_contains_hits() {
    let service = Arc::new(FakeService::default());
    let (event_tx, event_rx) = mpsc::channel();
    let handle = ClientHandle::new(service.clone(), event_tx).expect("handle");

    handle.submit(
        1,
        ClientRequest::Search {
            query: "rust".into(),
        },
    );
    let event = next_event(&event_rx);
    match event.reply {
        ClientReply::Search(Ok(response)) => {
            assert_eq!(response.into_hits()[0].path.as_deref(), Some("rust.txt"));
        }
        other => panic!("unexpected reply {other:?}"),
    }
    assert_eq!(*service.calls.lock().unwrap(), vec!["search rust".to_string()]);
}
