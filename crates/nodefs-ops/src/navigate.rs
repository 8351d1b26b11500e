//! Working-directory navigation and listing.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use nodefs_core::{FsResult, NodeId, NodeKind, Session};

use crate::path::resolve_directory;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub name: CompactString,
    pub kind: NodeKind,
}

/// Contents of one directory, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Full path of the listed directory.
    pub path: String,
    pub entries: Vec<ListEntry>,
}

impl Listing {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Change the session's working directory.
///
/// `None` and `"/"` both go to the root. On failure cwd is left unchanged.
pub fn change_dir(session: &mut Session, path: Option<&str>) -> FsResult<NodeId> {
    let target = match path {
        None => session.root(),
        Some(path) => resolve_directory(session, path)?,
    };
    session.set_cwd(target)?;
    tracing::debug!(cwd = %session.cwd_path(), "working directory changed");
    Ok(target)
}

/// Full path of the working directory.
pub fn working_dir(session: &Session) -> String {
    session.cwd_path()
}

/// List the directory at `path` (the cwd when `None`).
pub fn list_directory(session: &Session, path: Option<&str>) -> FsResult<Listing> {
    let dir = resolve_directory(session, path.unwrap_or(""))?;
    let tree = session.tree();

    Ok(Listing {
        path: tree.path_of(dir),
        entries: tree
            .children(dir)
            .map(|node| ListEntry {
                name: node.name.clone(),
                kind: node.kind,
            })
            .collect(),
    })
}
