use std::fs::FileType;
use std::path::PathBuf;

/// A single item produced by a [`Source`](crate::traits::Source) during traversal.
///
/// Directories and the traversal root are entries too. They are reported to
/// the console in verbose mode but never reach a [`Matcher`](crate::traits::Matcher).
#[derive(Debug, Clone)]
pub struct Entry {
    /// Full path to the entry, as produced by the walk (root-prefixed).
    pub path: PathBuf,

    /// Base name: the final path component.
    pub name: String,

    /// What kind of entry this is.
    pub kind: EntryKind,

    /// How deep in the traversal this entry was found. Root = 0.
    pub depth: usize,
}

/// The kind of a traversed entry.
///
/// Symlinks are not followed, so a link is its own kind rather than the kind
/// of its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl EntryKind {
    /// Whether this entry can ever be a match.
    pub fn is_dir(self) -> bool {
        self == Self::Dir
    }
}

impl From<FileType> for EntryKind {
    fn from(ft: FileType) -> Self {
        if ft.is_dir() {
            Self::Dir
        } else if ft.is_file() {
            Self::File
        } else if ft.is_symlink() {
            Self::Symlink
        } else {
            Self::Other
        }
    }
}
