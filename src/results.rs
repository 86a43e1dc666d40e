use std::path::PathBuf;
use std::time::Duration;

/// One matching file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Full path of the match, root-prefixed as the walk produced it.
    pub path: PathBuf,
}

/// Performance statistics for a completed walk.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Regular files encountered (matched or not).
    pub files: usize,

    /// Directories encountered, the root included.
    pub dirs: usize,

    /// Symlinks and special files encountered.
    pub others: usize,

    /// Entries skipped because of a recoverable error.
    pub errors: usize,

    /// Wall-clock time spent walking.
    pub duration: Duration,

    /// Total entries scanned per second. Convenience field, equals
    /// `(files + dirs + others) / duration.as_secs_f64()`, clamped to 0 on
    /// zero-duration runs.
    pub entries_per_sec: usize,
}

impl ScanStats {
    /// Compute `entries_per_sec` from raw counts and duration.
    pub(crate) fn compute(
        files: usize,
        dirs: usize,
        others: usize,
        errors: usize,
        duration: Duration,
    ) -> Self {
        let total = files + dirs + others;
        let eps = if duration.as_secs_f64() > 0.0 {
            (total as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        Self {
            files,
            dirs,
            others,
            errors,
            duration,
            entries_per_sec: eps,
        }
    }

    pub fn entries(&self) -> usize {
        self.files + self.dirs + self.others
    }
}
