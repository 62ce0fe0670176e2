//! Background job plumbing for gateway calls.
//!
//! Workers run on plain threads and report back over an mpsc channel so the
//! UI thread never blocks on the network. Catalog loads are superseded by
//! newer requests; detail and prediction calls are one-at-a-time.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

use crate::api::{ApiClient, ApiError, Envelope, ListQuery};
use crate::bacteria::{BacteriaRecord, PredictionRequest, PredictionResult};

/// Results delivered back to the UI thread by worker threads.
pub(in crate::egui_app::controller) enum JobMessage {
    CatalogLoaded(CatalogLoadResult),
    DetailLoaded(DetailLoadResult),
    PredictionFinished(PredictionJobResult),
}

#[derive(Debug)]
pub(in crate::egui_app::controller) struct CatalogLoadResult {
    pub request_id: u64,
    pub result: Result<Envelope<Vec<BacteriaRecord>>, ApiError>,
}

/// How to address a record when fetching its detail view.
#[derive(Clone, Debug, PartialEq)]
pub(in crate::egui_app::controller) enum DetailKey {
    Id(i64),
    NaturalKey(String),
}

#[derive(Debug)]
pub(in crate::egui_app::controller) struct DetailLoadResult {
    pub result: Result<Envelope<BacteriaRecord>, ApiError>,
}

#[derive(Debug)]
pub(in crate::egui_app::controller) struct PredictionJobResult {
    pub result: Result<PredictionResult, ApiError>,
}

pub(in crate::egui_app::controller) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    next_catalog_request_id: u64,
    pub(in crate::egui_app::controller) pending_catalog_request: Option<u64>,
    pub(in crate::egui_app::controller) detail_in_progress: bool,
    pub(in crate::egui_app::controller) prediction_in_progress: bool,
}

impl ControllerJobs {
    pub fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            next_catalog_request_id: 1,
            pending_catalog_request: None,
            detail_in_progress: false,
            prediction_in_progress: false,
        }
    }

    pub fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    fn next_catalog_request_id(&mut self) -> u64 {
        let request_id = self.next_catalog_request_id;
        self.next_catalog_request_id = self.next_catalog_request_id.wrapping_add(1).max(1);
        request_id
    }

    /// Start a catalog page fetch. The newest request wins: responses for
    /// earlier ids are dropped on receipt.
    pub fn begin_catalog_load(&mut self, client: ApiClient, query: ListQuery) {
        let request_id = self.next_catalog_request_id();
        self.pending_catalog_request = Some(request_id);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.list_bacteria(&query);
            let _ = tx.send(JobMessage::CatalogLoaded(CatalogLoadResult {
                request_id,
                result,
            }));
        });
    }

    pub fn catalog_response_is_stale(&self, request_id: u64) -> bool {
        self.pending_catalog_request != Some(request_id)
    }

    pub fn clear_catalog_load(&mut self) {
        self.pending_catalog_request = None;
    }

    pub fn begin_detail_load(&mut self, client: ApiClient, key: DetailKey) {
        if self.detail_in_progress {
            return;
        }
        self.detail_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = match &key {
                DetailKey::Id(id) => client.bacteria_by_id(*id),
                DetailKey::NaturalKey(natural_key) => client.bacteria_by_natural_key(natural_key),
            };
            let _ = tx.send(JobMessage::DetailLoaded(DetailLoadResult { result }));
        });
    }

    pub fn clear_detail_load(&mut self) {
        self.detail_in_progress = false;
    }

    pub fn begin_prediction(&mut self, client: ApiClient, request: PredictionRequest) {
        if self.prediction_in_progress {
            return;
        }
        self.prediction_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.predict(&request);
            let _ = tx.send(JobMessage::PredictionFinished(PredictionJobResult { result }));
        });
    }

    pub fn clear_prediction(&mut self) {
        self.prediction_in_progress = false;
    }
}
