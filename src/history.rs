//! Request history tracking for debugging and diagnostics.

use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Kind of event in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Request,
    Response,
    Error,
}

/// A recorded vendor call event. Credentials are never recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub kind: EventKind,
    pub method: String,
    pub path: String,
    pub status: Option<u16>,
    pub detail: Option<String>,
    /// Seconds since history creation
    pub timestamp: f64,
}

/// Tracks vendor calls made by a bridge.
#[derive(Debug, Clone)]
pub struct RequestHistory {
    counts: HashMap<EventKind, usize>,
    last_error: Option<String>,
    start_time: Instant,
    entries: Vec<HistoryEntry>,
    max_entries: usize,
}

impl Default for RequestHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestHistory {
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            last_error: None,
            start_time: Instant::now(),
            entries: Vec::new(),
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::new()
        }
    }

    pub fn record_request(&mut self, method: &str, path: &str) {
        self.push(EventKind::Request, method, path, None, None);
    }

    pub fn record_response(&mut self, method: &str, path: &str, status: u16) {
        self.push(EventKind::Response, method, path, Some(status), None);
    }

    pub fn record_error(&mut self, method: &str, path: &str, error: &str) {
        self.last_error = Some(error.to_string());
        self.push(EventKind::Error, method, path, None, Some(error.to_string()));
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of events of `kind` ever recorded, including evicted ones.
    pub fn count(&self, kind: EventKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
        self.entries.clear();
        self.last_error = None;
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            request_count: self.count(EventKind::Request),
            response_count: self.count(EventKind::Response),
            error_count: self.count(EventKind::Error),
            total_entries: self.entries.len(),
            last_error: self.last_error.clone(),
        }
    }

    fn push(
        &mut self,
        kind: EventKind,
        method: &str,
        path: &str,
        status: Option<u16>,
        detail: Option<String>,
    ) {
        *self.counts.entry(kind).or_insert(0) += 1;

        self.entries.push(HistoryEntry {
            kind,
            method: method.to_string(),
            path: path.to_string(),
            status,
            detail,
            timestamp: self.start_time.elapsed().as_secs_f64(),
        });

        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }
}

/// Summary of request history for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    pub request_count: usize,
    pub response_count: usize,
    pub error_count: usize,
    pub total_entries: usize,
    pub last_error: Option<String>,
}
