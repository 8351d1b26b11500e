//! Session context: the tree plus the current working directory.

use crate::config::TreeConfig;
use crate::error::{FsError, FsResult};
use crate::node::NodeId;
use crate::tree::NodeTree;

/// Everything a namespace operation reads or mutates.
///
/// One session is driven by one logical actor; mutation goes through
/// `&mut Session`, so access is serialized by the borrow checker.
#[derive(Debug, Clone)]
pub struct Session {
    tree: NodeTree,
    cwd: NodeId,
    config: TreeConfig,
}

impl Session {
    /// Create a session with an empty tree and cwd at the root.
    pub fn new(config: TreeConfig) -> Self {
        let tree = NodeTree::new();
        let cwd = tree.root();
        Self { tree, cwd, config }
    }

    /// The namespace tree.
    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Mutable access to the namespace tree.
    pub fn tree_mut(&mut self) -> &mut NodeTree {
        &mut self.tree
    }

    /// Handle of the root directory.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Handle of the current working directory.
    pub fn cwd(&self) -> NodeId {
        self.cwd
    }

    /// Full path of the current working directory.
    pub fn cwd_path(&self) -> String {
        self.tree.path_of(self.cwd)
    }

    /// Move the current working directory. The target must be a directory.
    pub fn set_cwd(&mut self, id: NodeId) -> FsResult<()> {
        match self.tree.get(id) {
            Some(node) if node.is_dir() => {
                self.cwd = id;
                Ok(())
            }
            _ => Err(FsError::NotADirectory {
                path: self.tree.path_of(id),
            }),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TreeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn test_new_session_starts_at_root() {
        let session = Session::default();
        assert_eq!(session.cwd(), session.root());
        assert_eq!(session.cwd_path(), "/");
    }

    #[test]
    fn test_set_cwd() {
        let mut session = Session::default();
        let root = session.root();
        let dir = session
            .tree_mut()
            .append_child(root, "home", NodeKind::Directory)
            .unwrap();
        let file = session
            .tree_mut()
            .append_child(root, "readme", NodeKind::File)
            .unwrap();

        session.set_cwd(dir).unwrap();
        assert_eq!(session.cwd_path(), "/home");

        let err = session.set_cwd(file).unwrap_err();
        assert!(matches!(err, FsError::NotADirectory { .. }));
        assert_eq!(session.cwd(), dir);
    }
}
