//! Retrieval request/response protocol.
//!
//! Every change that needs fresh products from the backend yields a
//! [`RetrievalRequest`] stamped with a monotonically increasing sequence
//! number. The caller runs it however it likes and hands the
//! [`RetrievalResponse`] back; only the response to the most recently issued
//! request is applied, so a slow answer to an older request can never
//! overwrite a newer one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_catalog::Product;

use crate::backend::{BackendError, ProductQuery};

/// A retrieval the engine wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalRequest {
    pub seq: u64,
    pub query: ProductQuery,
}

impl RetrievalRequest {
    /// Pair this request with the backend's answer.
    pub fn respond(self, result: Result<Vec<Product>, BackendError>) -> RetrievalResponse {
        RetrievalResponse {
            seq: self.seq,
            query: self.query,
            result,
        }
    }
}

/// Backend answer to a [`RetrievalRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalResponse {
    pub seq: u64,
    pub query: ProductQuery,
    pub result: Result<Vec<Product>, BackendError>,
}

/// What [`crate::ShopEngine::apply_retrieval`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Products replaced the base catalog and the result was recomputed.
    Applied,
    /// The backend failed; the last good result stays and the failure flag is set.
    Failed,
    /// A newer request was issued after this one; nothing changed.
    Stale { latest: u64 },
}

/// Failure flag exposed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalFailure {
    pub seq: u64,
    pub query: ProductQuery,
    pub message: String,
    pub failed_at: DateTime<Utc>,
}

impl RetrievalFailure {
    pub(crate) fn new(seq: u64, query: ProductQuery, error: &BackendError) -> Self {
        Self {
            seq,
            query,
            message: error.to_string(),
            failed_at: Utc::now(),
        }
    }
}

/// Issues sequence numbers and remembers which one is current.
#[derive(Debug, Default, Clone)]
pub(crate) struct RetrievalSequence {
    latest: u64,
    in_flight: bool,
}

impl RetrievalSequence {
    pub(crate) fn issue(&mut self, query: ProductQuery) -> RetrievalRequest {
        self.latest += 1;
        self.in_flight = true;
        RetrievalRequest {
            seq: self.latest,
            query,
        }
    }

    pub(crate) fn latest(&self) -> u64 {
        self.latest
    }

    pub(crate) fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }

    pub(crate) fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub(crate) fn settle(&mut self) {
        self.in_flight = false;
    }
}
