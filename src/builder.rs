use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use crate::console::Console;
use crate::engine::{run_parallel, run_sequential, EngineOptions, WalkConfig};
use crate::entry::Entry;
use crate::error::OrionError;
use crate::session::{SearchRequest, SearchSession};
use crate::source::DirSource;
use crate::traits::{Matcher, Source};

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a search.
///
/// Created via [`orion::search()`](crate::search). Configure with chained
/// builder methods, then call [`run()`](SearchBuilder::run) to walk and
/// collect, and [`report`](crate::report) to print.
///
/// # Example
///
/// ```rust,ignore
/// let console = Console::stdout(false);
/// let session = orion::search()
///     .root("/var/log")
///     .matching("syslog")
///     .threads(4)
///     .run(&console)?;
/// orion::report(&session, &console)?;
/// ```
pub struct SearchBuilder {
    root:        Option<PathBuf>,
    source:      Option<Box<dyn Source>>,
    query:       String,
    matcher:     Option<Box<dyn Matcher>>,
    ignore_case: bool,
    extension:   Option<String>,
    threads:     usize,
    max_depth:   Option<usize>,
}

impl Default for SearchBuilder {
    fn default() -> Self {
        Self {
            root:        None,
            source:      None,
            query:       String::new(),
            matcher:     None,
            ignore_case: false,
            extension:   None,
            threads:     1,
            max_depth:   None,
        }
    }
}

impl SearchBuilder {
    // ── Where ─────────────────────────────────────────────────────────────

    /// Directory to search. Also the location named in the report.
    ///
    /// Not validated here: a root that does not exist surfaces as a single
    /// "Error walking the path" line during the walk.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Replace the filesystem walk with any [`Source`].
    ///
    /// Custom sources are always driven on the calling thread; `.threads()`
    /// only applies to the built-in filesystem walk.
    pub fn source(mut self, s: impl Source + 'static) -> Self {
        self.source = Some(Box::new(s));
        self
    }

    // ── What ──────────────────────────────────────────────────────────────

    /// Match files whose base name contains `query`. Case-sensitive unless
    /// `.ignore_case(true)`; an empty query matches every file.
    pub fn matching(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set a custom matcher. Overrides `.matching()`, `.ignore_case()` and
    /// `.extension()` for the match decision; the query is still recorded on
    /// the session.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Box::new(m));
        self
    }

    /// Compare names case-insensitively. Both the query and each base name
    /// are lowercased before the containment check. Off by default.
    pub fn ignore_case(mut self, yes: bool) -> Self {
        self.ignore_case = yes;
        self
    }

    /// Only match files with this extension (compared ASCII-case-insensitively,
    /// a leading `.` is ignored).
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = Some(ext.into());
        self
    }

    // ── How ───────────────────────────────────────────────────────────────

    /// Number of walker threads. `1` (the default) walks sequentially and
    /// reports matches in lexical traversal order; more than one walks in
    /// parallel and reports them in discovery order.
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = n;
        self
    }

    /// Maximum traversal depth. `0` means the root only, `1` means one
    /// level of children, and so on. Unlimited by default.
    pub fn max_depth(mut self, d: usize) -> Self {
        self.max_depth = Some(d);
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Walk, match and collect. Blocks until the walk completes.
    ///
    /// Diagnostics (and, when the console is verbose, per-entry tracing) are
    /// written to `console` as the walk proceeds.
    ///
    /// # Errors
    ///
    /// Only configuration errors: no root given, or a thread count of zero.
    /// Filesystem failures never fail the search; they are reported on the
    /// console and the session simply holds fewer results.
    pub fn run<W: Write + Send>(self, console: &Console<W>) -> Result<SearchSession, OrionError> {
        let root = self.root.ok_or(OrionError::MissingRoot)?;
        if self.threads == 0 {
            return Err(OrionError::InvalidThreadCount(self.threads));
        }

        let matcher: Arc<dyn Matcher> = match self.matcher {
            Some(m) => Arc::from(m),
            None => Arc::new(QueryMatcher::new(&self.query, self.ignore_case, self.extension.as_deref())),
        };

        let opts = EngineOptions {
            config: WalkConfig {
                threads:   self.threads,
                max_depth: self.max_depth,
            },
            matcher,
        };

        let mut session = SearchSession::start(SearchRequest::new(self.query, root.clone()));
        console.searching();

        let stats = match self.source {
            Some(source) => run_sequential(source.as_ref(), &session, &opts, console),
            None if opts.config.threads > 1 => run_parallel(&root, &session, &opts, console),
            None => run_sequential(&DirSource::new(root), &session, &opts, console),
        };

        log::debug!(
            "scanned {} entries ({} files, {} dirs, {} other, {} skipped) in {:?}, {} matches",
            stats.entries(),
            stats.files,
            stats.dirs,
            stats.others,
            stats.errors,
            stats.duration,
            session.match_count()
        );
        session.set_stats(stats);
        Ok(session)
    }
}

// ---------------------------------------------------------------------------
// Built-in matcher
// ---------------------------------------------------------------------------

/// Base-name substring match, optionally case-folded and extension-filtered.
pub struct QueryMatcher {
    needle: String,
    ignore_case: bool,
    extension: Option<String>,
}

impl QueryMatcher {
    pub fn new(query: &str, ignore_case: bool, extension: Option<&str>) -> Self {
        let needle = if ignore_case {
            query.to_lowercase()
        } else {
            query.to_owned()
        };
        let extension = extension
            .map(|ext| ext.trim_start_matches('.'))
            .filter(|ext| !ext.is_empty())
            .map(str::to_owned);
        Self {
            needle,
            ignore_case,
            extension,
        }
    }
}

impl Matcher for QueryMatcher {
    fn is_match(&self, entry: &Entry) -> bool {
        if let Some(ext) = &self.extension {
            let same = entry
                .path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case(ext.as_str()));
            if !same {
                return false;
            }
        }

        if self.ignore_case {
            entry.name.to_lowercase().contains(&self.needle)
        } else {
            entry.name.contains(&self.needle)
        }
    }
}
