//! Directory and file creation.

use nodefs_core::{FsError, FsResult, NodeId, NodeKind, Session};

use crate::path::{ROOT_MARKER, resolve};

/// Create a directory at `path`.
///
/// Fails with `NoPathProvided` for `"/"` or an empty leaf,
/// `ComponentNotFound` when the parent cannot be resolved, and
/// `AlreadyExists` when the parent already holds a directory of that name.
/// The tree is unchanged on any failure.
pub fn make_directory(session: &mut Session, path: &str) -> FsResult<NodeId> {
    create_node(session, path, NodeKind::Directory)
}

/// Create an empty file entry at `path`.
///
/// Same rules as [`make_directory`], with the collision check applied to
/// files of the same name.
pub fn create_file(session: &mut Session, path: &str) -> FsResult<NodeId> {
    create_node(session, path, NodeKind::File)
}

fn create_node(session: &mut Session, path: &str, kind: NodeKind) -> FsResult<NodeId> {
    if path == ROOT_MARKER {
        return Err(FsError::NoPathProvided);
    }

    let resolved = resolve(session, path)?;
    if resolved.leaf.is_empty() {
        return Err(FsError::NoPathProvided);
    }

    let config = session.config();
    let name = config.bound_name(&resolved.leaf)?;

    let tree = session.tree();
    let existing = if config.unique_across_kinds {
        tree.find_any_child(resolved.parent, &name)
    } else {
        tree.find_child(resolved.parent, &name, kind)
    };
    if let Some(existing) = existing {
        return Err(FsError::exists(path, tree[existing].kind));
    }

    let id = session
        .tree_mut()
        .append_child(resolved.parent, name, kind)?;
    tracing::debug!(path, %kind, node = id.0, "node created");

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodefs_core::{DEFAULT_MAX_NAME_LEN, NamePolicy, TreeConfig};

    use crate::path::resolve_directory;

    fn child_names(session: &Session, parent: NodeId) -> Vec<String> {
        session
            .tree()
            .children(parent)
            .map(|n| n.name.to_string())
            .collect()
    }

    #[test]
    fn test_make_directory_at_root() {
        let mut session = Session::default();
        let id = make_directory(&mut session, "/docs").unwrap();

        let node = &session.tree()[id];
        assert!(node.is_dir());
        assert_eq!(node.name, "docs");
        assert_eq!(node.parent, Some(session.root()));
    }

    #[test]
    fn test_make_directory_relative() {
        let mut session = Session::default();
        let home = make_directory(&mut session, "home").unwrap();
        session.set_cwd(home).unwrap();

        let id = make_directory(&mut session, "user").unwrap();
        assert_eq!(session.tree().path_of(id), "/home/user");
    }

    #[test]
    fn test_make_directory_root_marker() {
        let mut session = Session::default();
        assert_eq!(
            make_directory(&mut session, "/").unwrap_err(),
            FsError::NoPathProvided
        );
        assert_eq!(session.tree().len(), 1);
    }

    #[test]
    fn test_make_directory_empty_leaf() {
        let mut session = Session::default();
        make_directory(&mut session, "/a").unwrap();
        let before = session.tree().clone();

        for path in ["", "a/", "/a/", "//"] {
            assert_eq!(
                make_directory(&mut session, path).unwrap_err(),
                FsError::NoPathProvided,
                "path {path:?}"
            );
        }
        assert_eq!(session.tree(), &before);
    }

    #[test]
    fn test_make_directory_twice() {
        let mut session = Session::default();
        make_directory(&mut session, "/a").unwrap();
        let after_first = session.tree().clone();

        let err = make_directory(&mut session, "/a").unwrap_err();
        assert_eq!(err, FsError::exists("/a", NodeKind::Directory));
        assert_eq!(err.to_string(), "directory /a already exists");
        assert_eq!(session.tree(), &after_first);
    }

    #[test]
    fn test_make_directory_missing_parent() {
        let mut session = Session::default();
        let err = make_directory(&mut session, "/x/y").unwrap_err();
        assert_eq!(err, FsError::not_found("x"));
        assert_eq!(session.tree().len(), 1);
    }

    #[test]
    fn test_directory_and_file_may_share_name_by_default() {
        let mut session = Session::default();
        create_file(&mut session, "/same").unwrap();
        make_directory(&mut session, "/same").unwrap();

        assert_eq!(child_names(&session, session.root()), vec!["same", "same"]);
        assert!(resolve_directory(&session, "/same").is_ok());
    }

    #[test]
    fn test_unique_across_kinds() {
        let config = TreeConfig::builder()
            .unique_across_kinds(true)
            .build()
            .unwrap();
        let mut session = Session::new(config);
        create_file(&mut session, "/same").unwrap();

        let err = make_directory(&mut session, "/same").unwrap_err();
        assert_eq!(err, FsError::exists("/same", NodeKind::File));
        assert_eq!(err.to_string(), "file /same already exists");
    }

    #[test]
    fn test_create_file_twice() {
        let mut session = Session::default();
        create_file(&mut session, "notes").unwrap();
        assert_eq!(
            create_file(&mut session, "notes").unwrap_err(),
            FsError::exists("notes", NodeKind::File)
        );
    }

    #[test]
    fn test_long_name_is_truncated() {
        let mut session = Session::default();
        let long = "n".repeat(100);
        let id = make_directory(&mut session, &format!("/{long}")).unwrap();
        assert_eq!(session.tree()[id].name.len(), 63);

        // A second request that truncates to the same name collides.
        let again = format!("/{}x", "n".repeat(70));
        assert!(matches!(
            make_directory(&mut session, &again),
            Err(FsError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_long_name_rejected() {
        let config = TreeConfig::builder()
            .max_name_len(4usize)
            .name_policy(NamePolicy::Reject)
            .build()
            .unwrap();
        let mut session = Session::new(config);

        let err = make_directory(&mut session, "/toolong").unwrap_err();
        assert!(matches!(err, FsError::NameTooLong { max: 4, .. }));
        assert_eq!(session.tree().len(), 1);
    }

    #[test]
    fn test_long_path_truncated_before_split() {
        let config = TreeConfig::builder()
            .max_name_len(8usize)
            .max_path_len(8usize)
            .build()
            .unwrap();
        let mut session = Session::new(config);
        let ab = make_directory(&mut session, "/ab").unwrap();

        // "/ab/cdefghij" is cut to "/ab/cdef" before the leaf is taken.
        let id = make_directory(&mut session, "/ab/cdefghij").unwrap();
        assert_eq!(session.tree()[id].name, "cdef");
        assert_eq!(session.tree()[id].parent, Some(ab));

        // The cut may land inside a directory component.
        let id = make_directory(&mut session, "/abcdefghij/x").unwrap();
        assert_eq!(session.tree()[id].name, "abcdefg");
        assert_eq!(session.tree()[id].parent, Some(session.root()));
    }

    #[test]
    fn test_long_leaf_truncated_to_default_name_bound() {
        let mut session = Session::default();
        let id = create_file(&mut session, &"f".repeat(300)).unwrap();
        assert_eq!(session.tree()[id].name.len(), DEFAULT_MAX_NAME_LEN);
    }

    #[test]
    fn test_long_path_rejected() {
        let config = TreeConfig::builder()
            .name_policy(NamePolicy::Reject)
            .build()
            .unwrap();
        let mut session = Session::new(config);
        make_directory(&mut session, "/a").unwrap();
        let before = session.tree().clone();

        let path = format!("/{}", "a/".repeat(200));
        let err = make_directory(&mut session, &path).unwrap_err();
        assert_eq!(err, FsError::PathTooLong { len: 401, max: 255 });
        assert_eq!(
            err.to_string(),
            "path of 401 characters exceeds 255 characters"
        );
        assert_eq!(session.tree(), &before);

        let err = resolve_directory(&session, &path).unwrap_err();
        assert!(matches!(err, FsError::PathTooLong { len: 401, .. }));
    }
}
