use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use ignore::{DirEntry, WalkBuilder, WalkState};

use crate::console::Console;
use crate::entry::{Entry, EntryKind};
use crate::error::OrionError;
use crate::results::{ScanStats, SearchResult};
use crate::session::SearchSession;
use crate::source::probe_root;
use crate::traits::{Matcher, Source};

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Traversal parameters passed from the builder to the engine and on to
/// [`Source::walk`].
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// `1` walks sequentially in lexical order; more uses the parallel walker.
    pub threads:   usize,
    /// `0` means the root only, `1` one level of children, and so on.
    pub max_depth: Option<usize>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            threads:   1,
            max_depth: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to the drivers.
pub(crate) struct EngineOptions {
    pub config:  WalkConfig,
    pub matcher: Arc<dyn Matcher>,
}

// ---------------------------------------------------------------------------
// Counters
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Counters {
    files:  AtomicUsize,
    dirs:   AtomicUsize,
    others: AtomicUsize,
    errors: AtomicUsize,
}

impl Counters {
    fn classify(&self, kind: EntryKind) {
        let counter = match kind {
            EntryKind::File => &self.files,
            EntryKind::Dir => &self.dirs,
            EntryKind::Symlink | EntryKind::Other => &self.others,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    fn finish(&self, start: Instant) -> ScanStats {
        ScanStats::compute(
            self.files.load(Ordering::Relaxed),
            self.dirs.load(Ordering::Relaxed),
            self.others.load(Ordering::Relaxed),
            self.errors.load(Ordering::Relaxed),
            start.elapsed(),
        )
    }
}

// ---------------------------------------------------------------------------
// Per-entry step (shared by both drivers)
// ---------------------------------------------------------------------------

fn visit<W: Write + Send>(
    entry: Entry,
    matcher: &dyn Matcher,
    session: &SearchSession,
    console: &Console<W>,
    counters: &Counters,
) {
    console.processing(&entry.path);
    counters.classify(entry.kind);

    if entry.kind.is_dir() || !matcher.is_match(&entry) {
        return;
    }

    console.found_match(&entry.path);
    session.record(SearchResult { path: entry.path });
}

fn skip<W: Write + Send>(err: &OrionError, console: &Console<W>, counters: &Counters) {
    log::debug!("skipping entry: {err:?}");
    counters.error();
    console.entry_error(err);
}

// ---------------------------------------------------------------------------
// Sequential driver
// ---------------------------------------------------------------------------

/// Drain `source` on the calling thread. Results land in traversal order.
pub(crate) fn run_sequential<W: Write + Send>(
    source: &dyn Source,
    session: &SearchSession,
    opts: &EngineOptions,
    console: &Console<W>,
) -> ScanStats {
    let counters = Counters::default();
    let start    = Instant::now();

    match source.walk(&opts.config) {
        Ok(entries) => {
            for res in entries {
                match res {
                    Ok(entry) => visit(entry, opts.matcher.as_ref(), session, console, &counters),
                    Err(err) => skip(&err, console, &counters),
                }
            }
        }
        Err(err) => {
            log::debug!("walk aborted at root: {err:?}");
            console.walk_failed(&err);
        }
    }

    counters.finish(start)
}

// ---------------------------------------------------------------------------
// Parallel driver
// ---------------------------------------------------------------------------

/// Walk `root` on `opts.config.threads` workers.
///
/// The set of matches equals what the sequential driver finds; their order is
/// whichever worker recorded first.
pub(crate) fn run_parallel<W: Write + Send>(
    root: &Path,
    session: &SearchSession,
    opts: &EngineOptions,
    console: &Console<W>,
) -> ScanStats {
    let counters = Counters::default();
    let start    = Instant::now();

    if let Err(err) = probe_root(root) {
        log::debug!("walk aborted at root: {err:?}");
        console.walk_failed(&err);
        return counters.finish(start);
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .ignore(false)
        .parents(false)
        .hidden(false)
        .follow_links(false)
        .same_file_system(false)
        .threads(opts.config.threads)
        .max_depth(opts.config.max_depth);

    // Scoped borrows: `run` blocks until every worker is done.
    let counters_ref = &counters;
    builder.build_parallel().run(|| {
        let matcher = Arc::clone(&opts.matcher);

        Box::new(move |res: Result<DirEntry, ignore::Error>| -> WalkState {
            let entry = match res {
                Ok(e) => e,
                Err(e) => {
                    skip(&OrionError::from(e), console, counters_ref);
                    return WalkState::Continue;
                }
            };

            // Only stdin entries lack a file type; a directory walk never yields one.
            let Some(ft) = entry.file_type() else {
                return WalkState::Continue;
            };

            let orion_entry = Entry {
                name:  entry.file_name().to_string_lossy().into_owned(),
                kind:  EntryKind::from(ft),
                depth: entry.depth(),
                path:  entry.into_path(),
            };

            visit(orion_entry, matcher.as_ref(), session, console, counters_ref);
            WalkState::Continue
        })
    });

    counters.finish(start)
}
