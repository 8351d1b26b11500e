//! Arena-backed namespace tree and statistics.

use std::ops::Index;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::{FsError, FsResult};
use crate::node::{Node, NodeId, NodeKind};

/// Summary statistics for a namespace tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Number of directories, excluding the root.
    pub total_dirs: u64,
    /// Number of files.
    pub total_files: u64,
    /// Deepest level reached (root children are depth 1).
    pub max_depth: u32,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directory.
    pub fn record_dir(&mut self, depth: u32) {
        self.total_dirs += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a file.
    pub fn record_file(&mut self, depth: u32) {
        self.total_files += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}

/// Owned, nested view of a subtree, used for JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Entry name.
    pub name: CompactString,
    /// Directory or file.
    pub kind: NodeKind,
    /// Children in insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

/// The namespace: every node lives in one arena and links to others by [`NodeId`].
///
/// The only mutator is [`NodeTree::append_child`], which keeps the
/// parent/child/sibling links consistent. Nodes are never removed, so every
/// `NodeId` handed out by a tree stays valid for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeTree {
    nodes: Vec<Node>,
}

impl NodeTree {
    /// Handle of the root node in every tree.
    pub const ROOT: NodeId = NodeId(0);

    /// Create a tree holding only the root directory.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root(Self::ROOT)],
        }
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    /// Look up a node by handle.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so this is never true.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate the direct children of `parent` in insertion order.
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(parent).and_then(|n| n.child),
        }
    }

    /// Find the first child of `parent` named `name` with the given kind.
    pub fn find_child(&self, parent: NodeId, name: &str, kind: NodeKind) -> Option<NodeId> {
        self.children(parent)
            .find(|child| child.kind == kind && child.name == name)
            .map(|child| child.id)
    }

    /// Find the first child of `parent` named `name`, whatever its kind.
    pub fn find_any_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .find(|child| child.name == name)
            .map(|child| child.id)
    }

    /// Append a new node at the tail of `parent`'s child list.
    ///
    /// Uniqueness is the caller's concern; this only maintains the links.
    /// Fails with `AllocationFailure` if the arena cannot grow and with
    /// `NotADirectory` if `parent` is a file. The tree is unchanged on error.
    ///
    /// Panics if `parent` was not produced by this tree.
    pub fn append_child(
        &mut self,
        parent: NodeId,
        name: impl Into<CompactString>,
        kind: NodeKind,
    ) -> FsResult<NodeId> {
        if !self[parent].is_dir() {
            return Err(FsError::NotADirectory {
                path: self.path_of(parent),
            });
        }

        self.nodes
            .try_reserve(1)
            .map_err(|_| FsError::AllocationFailure)?;

        let id = NodeId::new(self.nodes.len() as u64);
        let tail = self.children(parent).last().map(|n| n.id);
        let node = match kind {
            NodeKind::Directory => Node::new_directory(id, name, parent),
            NodeKind::File => Node::new_file(id, name, parent),
        };
        self.nodes.push(node);

        match tail {
            Some(last) => self.nodes[last.index()].sibling = Some(id),
            None => self.nodes[parent.index()].child = Some(id),
        }

        Ok(id)
    }

    /// Full absolute path of a node. The root renders as `/`.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = self.get(id);
        while let Some(node) = current {
            if node.is_root() {
                break;
            }
            names.push(node.name.as_str());
            current = node.parent.and_then(|p| self.get(p));
        }

        if names.is_empty() {
            return "/".to_string();
        }
        names.iter().rev().fold(String::new(), |mut acc, name| {
            acc.push('/');
            acc.push_str(name);
            acc
        })
    }

    /// Pre-order walk of the whole tree, yielding `(depth, node)`.
    ///
    /// The root is yielded first at depth 0; siblings appear in insertion order.
    pub fn walk(&self) -> Walk<'_> {
        self.walk_from(Self::ROOT)
    }

    /// Pre-order walk of the subtree rooted at `start`.
    pub fn walk_from(&self, start: NodeId) -> Walk<'_> {
        Walk {
            tree: self,
            stack: self.get(start).map(|n| (0, n.id)).into_iter().collect(),
        }
    }

    /// Compute directory/file counts and depth.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::new();
        for (depth, node) in self.walk().skip(1) {
            match node.kind {
                NodeKind::Directory => stats.record_dir(depth),
                NodeKind::File => stats.record_file(depth),
            }
        }
        stats
    }

    /// Build an owned nested snapshot of the subtree at `id`.
    ///
    /// Built from the pre-order walk with an explicit stack, so depth is
    /// bounded only by memory.
    pub fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        let mut open: Vec<(u32, NodeSnapshot)> = Vec::new();
        for (depth, node) in self.walk_from(id) {
            while open.last().is_some_and(|(d, _)| *d >= depth) {
                close_top(&mut open);
            }
            open.push((
                depth,
                NodeSnapshot {
                    name: node.name.clone(),
                    kind: node.kind,
                    children: Vec::new(),
                },
            ));
        }
        while open.len() > 1 {
            close_top(&mut open);
        }
        open.pop().map(|(_, snapshot)| snapshot)
    }
}

/// Pop the innermost open snapshot and attach it to its parent.
fn close_top(open: &mut Vec<(u32, NodeSnapshot)>) {
    if let Some((_, done)) = open.pop() {
        if let Some((_, parent)) = open.last_mut() {
            parent.children.push(done);
        }
    }
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for NodeTree {
    type Output = Node;

    /// Panics if `id` was not produced by this tree.
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

/// Iterator over a directory's children, following sibling links.
pub struct Children<'a> {
    tree: &'a NodeTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.get(self.next?)?;
        self.next = node.sibling;
        Some(node)
    }
}

/// Pre-order iterator returned by [`NodeTree::walk`].
pub struct Walk<'a> {
    tree: &'a NodeTree,
    stack: Vec<(u32, NodeId)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (u32, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        let node = self.tree.get(id)?;

        // Push in reverse so the first child is popped next.
        let children: Vec<NodeId> = self.tree.children(id).map(|c| c.id).collect();
        self.stack
            .extend(children.into_iter().rev().map(|child| (depth + 1, child)));

        Some((depth, node))
    }
}
