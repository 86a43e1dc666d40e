use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::engine::WalkConfig;
use crate::entry::{Entry, EntryKind};
use crate::error::OrionError;
use crate::traits::{EntryIter, Source};

/// Sequential filesystem walk rooted at a directory.
///
/// Yields the root itself first (depth 0), then every entry below it with
/// siblings in file-name order, so repeated walks of an unchanged tree
/// produce the same sequence. Symlinks are reported, not followed.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Source for DirSource {
    fn walk(&self, config: &WalkConfig) -> Result<EntryIter<'_>, OrionError> {
        probe_root(&self.root)?;

        let mut walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name();
        if let Some(depth) = config.max_depth {
            walker = walker.max_depth(depth);
        }

        Ok(Box::new(walker.into_iter().map(|res| {
            let e = res?;
            Ok(Entry {
                name: e.file_name().to_string_lossy().into_owned(),
                path: e.path().to_path_buf(),
                kind: EntryKind::from(e.file_type()),
                depth: e.depth(),
            })
        })))
    }
}

/// Confirm the root can be stat'ed at all.
///
/// walkdir and ignore both report an unreadable root as an ordinary entry
/// error; we want it surfaced once, as a failure of the whole walk.
pub(crate) fn probe_root(root: &Path) -> Result<(), OrionError> {
    fs::symlink_metadata(root)
        .map(|_| ())
        .map_err(|e| OrionError::from_io(root, e))
}
