//! Path splitting and resolution.
//!
//! Splitting is pure string work: [`split_path`] cuts a path at its last
//! separator and [`Components`] yields the non-empty names of a directory
//! portion. Resolution walks those names through the session's tree.

use nodefs_core::{FsError, FsResult, NodeId, NodeKind, NodeTree, Session};

/// The path naming the root directory.
pub const ROOT_MARKER: &str = "/";

/// The only path delimiter.
pub const SEPARATOR: char = '/';

/// A path cut into its directory portion and leaf component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPath<'a> {
    /// Everything before the last separator, or `"/"` when that separator
    /// is the first character. Empty when the path has no separator.
    pub dir: &'a str,
    /// Everything after the last separator.
    pub leaf: &'a str,
}

impl<'a> SplitPath<'a> {
    /// Whether resolution starts at the root.
    pub fn is_absolute(&self) -> bool {
        self.dir.starts_with(SEPARATOR)
    }

    /// Directory names to walk, in order.
    pub fn components(&self) -> Components<'a> {
        Components::new(self.dir)
    }
}

/// Split `path` at its last separator.
pub fn split_path(path: &str) -> SplitPath<'_> {
    if path == ROOT_MARKER {
        return SplitPath {
            dir: ROOT_MARKER,
            leaf: "",
        };
    }

    match path.rfind(SEPARATOR) {
        None => SplitPath { dir: "", leaf: path },
        Some(0) => SplitPath {
            dir: ROOT_MARKER,
            leaf: &path[1..],
        },
        Some(idx) => SplitPath {
            dir: &path[..idx],
            leaf: &path[idx + 1..],
        },
    }
}

/// Lazy, single-pass sequence of the non-empty names in a path.
///
/// Leading, trailing and repeated separators produce no components.
#[derive(Debug, Clone)]
pub struct Components<'a> {
    inner: std::str::Split<'a, char>,
}

impl<'a> Components<'a> {
    /// Tokenize `path`; a leading separator is ignored.
    pub fn new(path: &'a str) -> Self {
        let path = path.strip_prefix(SEPARATOR).unwrap_or(path);
        Self {
            inner: path.split(SEPARATOR),
        }
    }
}

impl<'a> Iterator for Components<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find(|name| !name.is_empty())
    }
}

/// Outcome of resolving a path's parent directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Directory that should contain the leaf.
    pub parent: NodeId,
    /// Final path component; empty for `"/"`.
    pub leaf: String,
    /// Directory portion of the path as written.
    pub dir: String,
}

/// Resolve the directory that should contain the last component of `path`.
///
/// Absolute paths start at the root, relative ones at the session's cwd.
/// Every directory component must name an existing directory-kind child;
/// a file with a matching name does not count.
pub fn resolve(session: &Session, path: &str) -> FsResult<Resolved> {
    let path = session.config().bound_path(path)?;
    let split = split_path(&path);

    let start = if split.is_absolute() {
        session.root()
    } else {
        session.cwd()
    };
    let parent = descend(session.tree(), start, split.components())?;

    Ok(Resolved {
        parent,
        leaf: split.leaf.to_string(),
        dir: split.dir.to_string(),
    })
}

/// Resolve every component of `path`, leaf included, to a directory.
///
/// An empty path names the cwd and `"/"` names the root. A final component
/// naming a file fails with `NotADirectory`.
pub fn resolve_directory(session: &Session, path: &str) -> FsResult<NodeId> {
    let path = session.config().bound_path(path)?;
    let tree = session.tree();
    let mut current = if path.starts_with(SEPARATOR) {
        session.root()
    } else {
        session.cwd()
    };

    let mut components = Components::new(&path).peekable();
    while let Some(name) = components.next() {
        let is_last = components.peek().is_none();
        match tree.find_child(current, name, NodeKind::Directory) {
            Some(child) => current = child,
            None if is_last && tree.find_child(current, name, NodeKind::File).is_some() => {
                return Err(FsError::NotADirectory {
                    path: path.to_string(),
                });
            }
            None => {
                tracing::debug!(component = name, "path component not found");
                return Err(FsError::not_found(name));
            }
        }
    }

    Ok(current)
}

/// Walk `components` down from `start`, one directory child at a time.
fn descend<'a>(
    tree: &NodeTree,
    start: NodeId,
    components: impl Iterator<Item = &'a str>,
) -> FsResult<NodeId> {
    let mut current = start;
    for name in components {
        current = tree
            .find_child(current, name, NodeKind::Directory)
            .ok_or_else(|| {
                tracing::debug!(component = name, "path component not found");
                FsError::not_found(name)
            })?;
        tracing::trace!(component = name, node = current.0, "descended");
    }
    Ok(current)
}
