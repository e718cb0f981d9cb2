// Background fetch loading for the synchronous TUI loop
use crate::api::ResourceFetcher;
use crate::domain::{EntityKind, ResourceDetail, ResourceSummary};
use crate::error::{HolonetError, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Identifies one issued request; a screen only accepts its own ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// What a screen asks to have fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Collection(EntityKind),
    Detail(String),
}

/// Completed fetch, tagged by the kind of request that produced it
#[derive(Debug)]
pub enum FetchOutcome {
    Collection(Result<Vec<ResourceSummary>>),
    Detail(Result<ResourceDetail>),
}

impl FetchOutcome {
    fn failed(request: &FetchRequest, error: HolonetError) -> Self {
        match request {
            FetchRequest::Collection(_) => FetchOutcome::Collection(Err(error)),
            FetchRequest::Detail(_) => FetchOutcome::Detail(Err(error)),
        }
    }
}

/// Message types for the fetch worker
enum WorkerMessage {
    Fetch {
        ticket: FetchTicket,
        request: FetchRequest,
    },
    Shutdown,
}

type Completion = (FetchTicket, FetchOutcome);

/// Handle for sending requests to the fetch worker
#[derive(Clone)]
pub struct FetchLoader {
    request_tx: mpsc::Sender<WorkerMessage>,
}

impl FetchLoader {
    /// Spawns the worker; must be called from within a tokio runtime
    pub fn spawn(
        fetcher: Arc<dyn ResourceFetcher>,
        completion_tx: mpsc::UnboundedSender<Completion>,
    ) -> Self {
        let (request_tx, request_rx) = mpsc::channel(32);
        tokio::spawn(Self::worker(request_rx, fetcher, completion_tx));
        Self { request_tx }
    }

    /// Runs each request on its own task so a slow fetch never blocks the next
    async fn worker(
        mut request_rx: mpsc::Receiver<WorkerMessage>,
        fetcher: Arc<dyn ResourceFetcher>,
        completion_tx: mpsc::UnboundedSender<Completion>,
    ) {
        while let Some(message) = request_rx.recv().await {
            match message {
                WorkerMessage::Fetch { ticket, request } => {
                    let fetcher = Arc::clone(&fetcher);
                    let completion_tx = completion_tx.clone();
                    tokio::spawn(async move {
                        let outcome = match &request {
                            FetchRequest::Collection(kind) => {
                                FetchOutcome::Collection(fetcher.fetch_collection(*kind).await)
                            }
                            FetchRequest::Detail(url) => {
                                FetchOutcome::Detail(fetcher.fetch_detail(url).await)
                            }
                        };
                        debug!(?ticket, ?request, "Fetch finished");
                        // Receiver gone means the app is shutting down
                        let _ = completion_tx.send((ticket, outcome));
                    });
                }
                WorkerMessage::Shutdown => break,
            }
        }
    }

    pub async fn submit(&self, ticket: FetchTicket, request: FetchRequest) -> Result<()> {
        self.request_tx
            .send(WorkerMessage::Fetch { ticket, request })
            .await
            .map_err(|_| HolonetError::Runtime("Fetch worker shut down".to_string()))
    }

    pub async fn shutdown(&self) {
        let _ = self.request_tx.send(WorkerMessage::Shutdown).await;
    }
}

/// Synchronous front for the fetch worker.
///
/// Owns the tokio runtime and is polled once per frame. At most one ticket
/// is active; completions for any other ticket are dropped unapplied.
pub struct SyncFetchManager {
    runtime: tokio::runtime::Runtime,
    loader: FetchLoader,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    next_ticket: u64,
    active: Option<FetchTicket>,
    /// Failure to hand a request to the worker, reported on the next poll
    pending_failure: Option<FetchOutcome>,
}

impl SyncFetchManager {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(|e| HolonetError::Runtime(format!("Failed to create tokio runtime: {}", e)))?;
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let loader = {
            let _guard = runtime.enter();
            FetchLoader::spawn(fetcher, completion_tx)
        };

        Ok(Self {
            runtime,
            loader,
            completion_rx,
            next_ticket: 0,
            active: None,
            pending_failure: None,
        })
    }

    /// Issues a request and makes it the active one
    pub fn begin(&mut self, request: FetchRequest) -> FetchTicket {
        self.next_ticket += 1;
        let ticket = FetchTicket(self.next_ticket);
        self.active = Some(ticket);
        self.pending_failure = None;

        debug!(?ticket, ?request, "Fetch started");
        let loader = self.loader.clone();
        let submitted = self
            .runtime
            .block_on(async { loader.submit(ticket, request.clone()).await });
        if let Err(e) = submitted {
            self.pending_failure = Some(FetchOutcome::failed(&request, e));
        }
        ticket
    }

    /// Forgets the active request; its response will be discarded
    pub fn abandon(&mut self) {
        if let Some(ticket) = self.active.take() {
            debug!(?ticket, "Fetch abandoned");
        }
        self.pending_failure = None;
    }

    pub fn is_pending(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the active request's outcome once it has arrived (non-blocking)
    pub fn poll(&mut self) -> Option<FetchOutcome> {
        if let Some(failure) = self.pending_failure.take() {
            self.active = None;
            return Some(failure);
        }
        while let Ok((ticket, outcome)) = self.completion_rx.try_recv() {
            if Some(ticket) == self.active {
                self.active = None;
                return Some(outcome);
            }
            debug!(?ticket, "Discarding late response");
        }
        None
    }
}

impl Drop for SyncFetchManager {
    fn drop(&mut self) {
        let loader = self.loader.clone();
        self.runtime.block_on(async move { loader.shutdown().await });
    }
}
