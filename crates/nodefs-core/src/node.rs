//! Directory and file node types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Handle to a node stored in a [`NodeTree`](crate::NodeTree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new NodeId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Position of this node in the arena.
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Type of namespace node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
    /// Directory that may hold children.
    Directory,
    /// Name-only file entry.
    File,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }

    /// Single-letter tag used in listings.
    pub fn tag(&self) -> char {
        match self {
            NodeKind::Directory => 'D',
            NodeKind::File => 'F',
        }
    }
}

/// A single entry in the namespace.
///
/// Children form a singly linked list: `child` points at the first entry and
/// each entry's `sibling` points at the next one, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Handle of this node.
    pub id: NodeId,

    /// Entry name (not full path). Empty for the root.
    pub name: CompactString,

    /// Directory or file.
    pub kind: NodeKind,

    /// First child (directories only).
    pub child: Option<NodeId>,

    /// Next entry under the same parent.
    pub sibling: Option<NodeId>,

    /// Containing directory; `None` only for the root.
    pub parent: Option<NodeId>,
}

impl Node {
    /// Create the root directory node.
    pub fn root(id: NodeId) -> Self {
        Self {
            id,
            name: CompactString::default(),
            kind: NodeKind::Directory,
            child: None,
            sibling: None,
            parent: None,
        }
    }

    /// Create a new detached directory node under `parent`.
    pub fn new_directory(id: NodeId, name: impl Into<CompactString>, parent: NodeId) -> Self {
        Self::new(id, name, NodeKind::Directory, parent)
    }

    /// Create a new detached file node under `parent`.
    pub fn new_file(id: NodeId, name: impl Into<CompactString>, parent: NodeId) -> Self {
        Self::new(id, name, NodeKind::File, parent)
    }

    fn new(id: NodeId, name: impl Into<CompactString>, kind: NodeKind, parent: NodeId) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            child: None,
            sibling: None,
            parent: Some(parent),
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Check if this node is the root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.0, 42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn test_root_node() {
        let root = Node::root(NodeId::new(0));
        assert!(root.is_root());
        assert!(root.is_dir());
        assert!(root.name.is_empty());
    }

    #[test]
    fn test_directory_node_creation() {
        let node = Node::new_directory(NodeId::new(1), "docs", NodeId::new(0));
        assert!(node.is_dir());
        assert!(!node.is_file());
        assert_eq!(node.parent, Some(NodeId::new(0)));
        assert!(node.child.is_none());
        assert!(node.sibling.is_none());
    }

    #[test]
    fn test_file_node_creation() {
        let node = Node::new_file(NodeId::new(2), "notes.txt", NodeId::new(0));
        assert!(node.is_file());
        assert_eq!(node.kind.tag(), 'F');
        assert_eq!(node.kind.to_string(), "file");
    }
}
