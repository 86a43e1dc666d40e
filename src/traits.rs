use crate::engine::WalkConfig;
use crate::entry::Entry;
use crate::error::OrionError;

/// The stream of entries a [`Source`] yields once its root is confirmed reachable.
pub type EntryIter<'a> = Box<dyn Iterator<Item = Result<Entry, OrionError>> + 'a>;

/// Something that can be walked entry by entry.
///
/// [`DirSource`](crate::DirSource) is the filesystem implementation; tests and
/// embedders can supply in-memory sources.
///
/// # Error Handling
///
/// `walk()` itself fails only when the root is wholly inaccessible; that is
/// the single top-level diagnostic. Anything that goes wrong after that is
/// yielded as `Err` for one entry, and the engine keeps going.
///
/// # Example
///
/// ```rust
/// use orion::{Entry, EntryIter, EntryKind, Source};
/// use orion::engine::WalkConfig;
///
/// struct VecSource(Vec<String>);
///
/// impl Source for VecSource {
///     fn walk(&self, _config: &WalkConfig) -> Result<EntryIter<'_>, orion::OrionError> {
///         Ok(Box::new(self.0.iter().map(|name| Ok(Entry {
///             path: name.into(),
///             name: name.clone(),
///             kind: EntryKind::File,
///             depth: 1,
///         }))))
///     }
/// }
/// ```
pub trait Source: Send + Sync {
    /// Start a traversal honouring `config.max_depth`.
    fn walk(&self, config: &WalkConfig) -> Result<EntryIter<'_>, OrionError>;
}

/// Determines whether a non-directory entry is a match.
///
/// The engine never passes directories here.
///
/// # Thread Safety
///
/// `Send + Sync` are required: matchers are shared across walker threads.
///
/// # Example
///
/// ```rust
/// use orion::{Matcher, Entry};
///
/// struct LargeNameMatcher;
///
/// impl Matcher for LargeNameMatcher {
///     fn is_match(&self, entry: &Entry) -> bool {
///         entry.name.len() > 32
///     }
/// }
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if this entry should be recorded as a result.
    fn is_match(&self, entry: &Entry) -> bool;
}
