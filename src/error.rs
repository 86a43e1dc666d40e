use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrionError {
    // Traversal
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("symlink loop: {}", .0.display())]
    SymlinkLoop(PathBuf),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("walk error: {0}")]
    Walk(String),

    // Config
    #[error("no search root provided")]
    MissingRoot,

    #[error("invalid thread count: {0}")]
    InvalidThreadCount(usize),

    // Console
    #[error("console I/O failed")]
    Console(#[source] io::Error),
}

impl OrionError {
    /// Classify an `io::Error` raised while touching `path`.
    pub fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            io::ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Io { path, source: err },
        }
    }

    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::SymlinkLoop(p)
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the walk can continue after this error.
    ///
    /// Traversal errors skip one entry. Configuration and console errors
    /// stop the search before (or instead of) reporting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_)
                | Self::NotFound(_)
                | Self::SymlinkLoop(_)
                | Self::Io { .. }
                | Self::Walk(_)
        )
    }
}

impl From<walkdir::Error> for OrionError {
    fn from(e: walkdir::Error) -> Self {
        let path = e.path().map(Path::to_path_buf).unwrap_or_default();
        if let Some(ancestor) = e.loop_ancestor() {
            log::debug!("loop back to {}", ancestor.display());
            return Self::SymlinkLoop(path);
        }
        let message = e.to_string();
        match e.into_io_error() {
            Some(io_err) => Self::from_io(path, io_err),
            None => Self::Walk(message),
        }
    }
}

impl From<ignore::Error> for OrionError {
    fn from(e: ignore::Error) -> Self {
        match e {
            ignore::Error::WithPath { path, err } => match *err {
                ignore::Error::Io(io_err) => Self::from_io(path, io_err),
                other => Self::Walk(format!("{}: {}", path.display(), other)),
            },
            ignore::Error::WithDepth { err, .. } => Self::from(*err),
            ignore::Error::Loop { child, .. } => Self::SymlinkLoop(child),
            ignore::Error::Io(io_err) => Self::from_io(PathBuf::new(), io_err),
            other => Self::Walk(other.to_string()),
        }
    }
}
