use std::sync::{mpsc, Arc};
use std::thread;

use seek_client::{
    ClientError, ClientEvent, ClientHandle, ClientReply, ClientRequest, SearchHit, SearchResponse,
    SearchService,
};
use seek_core::{BatchId, Effect, Msg, ResultEntry, SearchOutcome, StatusReason, UploadOutcome};
use seek_logging::{seek_error, seek_info, seek_warn};

use super::app::AppEvent;

/// Receives the effects produced by `update`.
pub trait EffectSink {
    fn run(&mut self, effects: Vec<Effect>);

    /// Called on the UI thread once the reply to an earlier request has
    /// been taken off the event queue.
    fn settle(&mut self);

    /// True while requests are still outstanding.
    fn is_busy(&self) -> bool;
}

/// Where a client reply has to be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    Status(StatusReason),
    Upload { batch: BatchId, index: usize },
    Search,
}

pub struct EffectRunner {
    client: ClientHandle<Route>,
    events: mpsc::Sender<AppEvent>,
    in_flight: usize,
}

impl EffectRunner {
    pub fn new(
        service: Arc<dyn SearchService>,
        events: mpsc::Sender<AppEvent>,
    ) -> Result<Self, ClientError> {
        let (client_tx, client_rx) = mpsc::channel();
        let client = ClientHandle::new(service, client_tx)?;
        spawn_event_loop(client_rx, events.clone());
        Ok(Self {
            client,
            events,
            in_flight: 0,
        })
    }

    fn submit(&mut self, route: Route, request: ClientRequest) {
        self.in_flight += 1;
        self.client.submit(route, request);
    }
}

impl EffectSink for EffectRunner {
    fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchStatus { reason } => {
                    self.submit(Route::Status(reason), ClientRequest::Status);
                }
                Effect::UploadFile { batch, index, file } => {
                    seek_info!(
                        "Upload batch={} index={} file={} path={:?}",
                        batch,
                        index,
                        file.name,
                        file.path
                    );
                    self.submit(
                        Route::Upload { batch, index },
                        ClientRequest::Upload {
                            file_name: file.name,
                            path: file.path,
                        },
                    );
                }
                Effect::Search { query } => {
                    seek_info!("Search query={:?}", query);
                    self.submit(Route::Search, ClientRequest::Search { query });
                }
                Effect::ExpireToast { toast_id, after } => {
                    let events = self.events.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = events.send(AppEvent::Core(Msg::ToastExpired(toast_id)));
                    });
                }
            }
        }
    }

    fn settle(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}

fn spawn_event_loop(
    client_rx: mpsc::Receiver<ClientEvent<Route>>,
    events: mpsc::Sender<AppEvent>,
) {
    thread::spawn(move || {
        while let Ok(event) = client_rx.recv() {
            if events.send(AppEvent::Reply(map_event(event))).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn map_event(event: ClientEvent<Route>) -> Msg {
    match (event.tag, event.reply) {
        (Route::Status(reason), ClientReply::Status(result)) => Msg::StatusLoaded {
            reason,
            result: result.map(|report| report.document_count()).map_err(|err| {
                seek_error!("Failed to update document count: {}", err);
                err.to_string()
            }),
        },
        (Route::Upload { batch, index }, ClientReply::Upload(result)) => Msg::UploadFinished {
            batch,
            index,
            outcome: match result {
                Ok(_) => UploadOutcome::Uploaded,
                Err(err) => {
                    seek_warn!("Upload error batch={} index={}: {}", batch, index, err);
                    UploadOutcome::Failed(err.to_string())
                }
            },
        },
        (Route::Search, ClientReply::Search(result)) => Msg::SearchCompleted(
            result.map(map_response).map_err(|err| {
                seek_warn!("Search error: {}", err);
                err.to_string()
            }),
        ),
        (route, reply) => {
            seek_error!("Reply {:?} does not match route {:?}", reply, route);
            Msg::NoOp
        }
    }
}

fn map_response(response: SearchResponse) -> SearchOutcome {
    let total = response.total;
    let duration_ms = response.duration_ms;
    SearchOutcome {
        results: response.into_hits().into_iter().map(map_hit).collect(),
        total,
        duration_ms,
    }
}

fn map_hit(hit: SearchHit) -> ResultEntry {
    ResultEntry {
        id: hit.id,
        path: hit.path,
        doc_type: hit.doc_type,
        indexed: hit.indexed,
        relevance_score: hit.relevance_score,
        snippets: hit.snippets.unwrap_or_default(),
        download_url: hit.download_url,
        view_url: hit.view_url,
    }
}
