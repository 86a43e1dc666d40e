use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::results::{ScanStats, SearchResult};

/// What to look for and where. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    root_dir: PathBuf,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            query: query.into(),
            root_dir: root_dir.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}

/// One search from start to report.
///
/// The session owns its result list. Walker threads append through
/// [`record`](SearchSession::record); the reporter reads it only after the
/// walk has returned. The list sits behind a mutex so the same session works
/// for both the sequential and the parallel engine.
#[derive(Debug)]
pub struct SearchSession {
    request: SearchRequest,
    results: Mutex<Vec<SearchResult>>,
    started: Instant,
    stats: ScanStats,
}

impl SearchSession {
    /// Start the clock. Elapsed time in the report is measured from here.
    pub fn start(request: SearchRequest) -> Self {
        Self {
            request,
            results: Mutex::new(Vec::new()),
            started: Instant::now(),
            stats: ScanStats::default(),
        }
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn record(&self, result: SearchResult) {
        self.lock().push(result);
    }

    /// Snapshot of the matches, in the order they were recorded.
    pub fn results(&self) -> Vec<SearchResult> {
        self.lock().clone()
    }

    pub fn match_count(&self) -> usize {
        self.lock().len()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    pub(crate) fn set_stats(&mut self, stats: ScanStats) {
        self.stats = stats;
    }

    // A worker that panicked mid-push cannot leave the Vec half-written.
    fn lock(&self) -> MutexGuard<'_, Vec<SearchResult>> {
        self.results.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
