//! # orion
//!
//! Recursive file-name search: walk a directory tree, keep the files whose
//! base name contains a query, print what was found and how long it took.
//!
//! The crate is split along the two halves of that job. The walk side is
//! [`SearchBuilder`] driving a [`Source`] (the filesystem, via [`DirSource`],
//! or anything else) through a [`Matcher`] into a [`SearchSession`]. The
//! report side is [`report`], which reads a finished session and writes it to
//! a [`Console`]. [`shell`] glues both to an interactive prompt.
//!
//! # Quick Start
//!
//! ```rust
//! use orion::{Console, Entry, EntryIter, EntryKind, OrionError, Source};
//! use orion::engine::WalkConfig;
//!
//! // A minimal in-memory source for demonstration
//! struct NameSource(Vec<&'static str>);
//!
//! impl Source for NameSource {
//!     fn walk(&self, _config: &WalkConfig) -> Result<EntryIter<'_>, OrionError> {
//!         Ok(Box::new(self.0.iter().map(|name| Ok(Entry {
//!             path:  name.into(),
//!             name:  name.to_string(),
//!             kind:  EntryKind::File,
//!             depth: 1,
//!         }))))
//!     }
//! }
//!
//! let console = Console::new(Vec::new(), false);
//! let session = orion::search()
//!     .root("inbox")
//!     .source(NameSource(vec!["invoice_jan.txt", "invoice_feb.txt", "report.txt"]))
//!     .matching("invoice")
//!     .run(&console)
//!     .unwrap();
//!
//! assert_eq!(session.match_count(), 2);
//! orion::report(&session, &console).unwrap();
//!
//! let out = String::from_utf8(console.into_inner()).unwrap();
//! assert!(out.contains("[Orion] Found 2 file(s) matching the query in inbox:"));
//! ```

#![forbid(unsafe_code)]

pub mod engine;
pub mod shell;

mod builder;
mod console;
mod entry;
mod error;
mod report;
mod results;
mod session;
mod source;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::{QueryMatcher, SearchBuilder};
pub use console::Console;
pub use entry::{Entry, EntryKind};
pub use error::OrionError;
pub use report::{report, write_report};
pub use results::{ScanStats, SearchResult};
pub use session::{SearchRequest, SearchSession};
pub use source::DirSource;
pub use traits::{EntryIter, Matcher, Source};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`SearchBuilder`] to configure and run a search.
pub fn search() -> SearchBuilder {
    SearchBuilder::default()
}
