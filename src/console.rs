//! The user-facing output stream.
//!
//! Every line a user (or a script scraping the output) sees goes through
//! [`Console`], so the `[Orion]` prefixes live in one place. Internal
//! diagnostics go through the `log` facade instead.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::OrionError;

pub const BANNER: &str = r#"
 ██████╗ ██████╗ ██╗ ██████╗ ███╗   ██╗
██╔═══██╗██╔══██╗██║██╔═══██╗████╗  ██║
██║   ██║██████╔╝██║██║   ██║██╔██╗ ██║
██║   ██║██╔══██╗██║██║   ██║██║╚██╗██║
╚██████╔╝██║  ██║██║╚██████╔╝██║ ╚████║
 ╚═════╝ ╚═╝  ╚═╝╚═╝ ╚═════╝ ╚═╝  ╚═══╝
"#;

pub const USAGE: &str = "[Orion] Usage: orion [--verbose] [--threads N] [--max-depth N] \
                         [--extension EXT] [--ignore-case] [--repeat]";

/// A line-oriented writer shared by the shell, the walker threads and the
/// reporter.
pub struct Console<W: Write + Send> {
    out: Mutex<W>,
    verbose: bool,
}

impl Console<io::Stdout> {
    pub fn stdout(verbose: bool) -> Self {
        Self::new(io::stdout(), verbose)
    }
}

impl<W: Write + Send> Console<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self {
            out: Mutex::new(out),
            verbose,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write one full line.
    pub fn line(&self, args: fmt::Arguments<'_>) -> Result<(), OrionError> {
        let mut out = self.lock();
        out.write_fmt(args)
            .and_then(|()| out.write_all(b"\n"))
            .map_err(OrionError::Console)
    }

    /// Write a prompt without a trailing newline and flush it.
    pub fn prompt(&self, text: &str) -> Result<(), OrionError> {
        let mut out = self.lock();
        out.write_all(text.as_bytes())
            .and_then(|()| out.flush())
            .map_err(OrionError::Console)
    }

    /// Run `f` with exclusive access to the writer.
    pub(crate) fn with_writer<T>(&self, f: impl FnOnce(&mut W) -> io::Result<T>) -> Result<T, OrionError> {
        let mut out = self.lock();
        f(&mut *out).map_err(OrionError::Console)
    }

    // ── Traversal diagnostics ──────────────────────────────────────────────
    //
    // These run inside the walk, which has no failure path of its own: a
    // console that cannot be written to is logged and the walk carries on.

    pub fn searching(&self) {
        self.diag(format_args!("\n[Orion] Searching for files..."));
    }

    pub fn processing(&self, path: &Path) {
        if self.verbose {
            self.diag(format_args!("[VM] Orion Currently processing: {}", path.display()));
        }
    }

    pub fn found_match(&self, path: &Path) {
        if self.verbose {
            self.diag(format_args!("[Orion] Found match: {}", path.display()));
        }
    }

    pub fn entry_error(&self, err: &OrionError) {
        self.diag(format_args!("[Orion] Error: {err} | Continuing..."));
    }

    pub fn walk_failed(&self, err: &OrionError) {
        self.diag(format_args!("[Orion] Error walking the path: {err}"));
    }

    fn diag(&self, args: fmt::Arguments<'_>) {
        if let Err(e) = self.line(args) {
            log::warn!("dropped console line: {e:?}");
        }
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
