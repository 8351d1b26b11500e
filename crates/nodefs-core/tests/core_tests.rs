use nodefs_core::{
    ConfigError, FsError, NamePolicy, NodeId, NodeKind, NodeTree, Session, TreeConfig,
};
use std::io::Write;

#[test]
fn test_node_id_operations() {
    let id1 = NodeId::new(7);
    let id2 = NodeId::new(7);

    assert_eq!(id1, id2);
    assert_eq!(NodeTree::ROOT, NodeId::new(0));
}

#[test]
fn test_node_kind_discrimination() {
    assert!(NodeKind::Directory.is_dir());
    assert!(!NodeKind::Directory.is_file());
    assert!(NodeKind::File.is_file());
    assert_eq!(NodeKind::Directory.tag(), 'D');
}

#[test]
fn test_sibling_chain_follows_insertion_order() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    for name in ["c", "a", "b"] {
        tree.append_child(root, name, NodeKind::Directory).unwrap();
    }

    let listed: Vec<&str> = tree.children(root).map(|n| n.name.as_str()).collect();
    assert_eq!(listed, vec!["c", "a", "b"]);

    // Manual walk over the raw links agrees with the iterator.
    let mut manual = Vec::new();
    let mut next = tree[root].child;
    while let Some(id) = next {
        manual.push(tree[id].name.as_str());
        assert_eq!(tree[id].parent, Some(root));
        next = tree[id].sibling;
    }
    assert_eq!(manual, listed);
}

#[test]
fn test_parent_links_are_consistent() {
    let mut tree = NodeTree::new();
    let a = tree
        .append_child(tree.root(), "a", NodeKind::Directory)
        .unwrap();
    let b = tree.append_child(a, "b", NodeKind::Directory).unwrap();
    tree.append_child(b, "c.txt", NodeKind::File).unwrap();

    for (_, node) in tree.walk().skip(1) {
        let parent = node.parent.expect("non-root node has a parent");
        assert!(tree.children(parent).any(|c| c.id == node.id));
    }
}

#[test]
fn test_tree_stats_counts() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let a = tree.append_child(root, "a", NodeKind::Directory).unwrap();
    tree.append_child(a, "one", NodeKind::File).unwrap();
    tree.append_child(a, "two", NodeKind::File).unwrap();
    tree.append_child(root, "b", NodeKind::Directory).unwrap();

    let stats = tree.stats();
    assert_eq!(stats.total_dirs, 2);
    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.max_depth, 2);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut tree = NodeTree::new();
    let a = tree
        .append_child(tree.root(), "a", NodeKind::Directory)
        .unwrap();
    tree.append_child(a, "notes", NodeKind::File).unwrap();

    let snapshot = tree.snapshot(tree.root()).unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["kind"], "directory");
    assert_eq!(json["children"][0]["name"], "a");
    assert_eq!(json["children"][0]["children"][0]["kind"], "file");
    assert!(json["children"][0]["children"][0].get("children").is_none());
}

#[test]
fn test_session_cwd_updates() {
    let mut session = Session::default();
    let root = session.root();
    let home = session
        .tree_mut()
        .append_child(root, "home", NodeKind::Directory)
        .unwrap();
    let user = session
        .tree_mut()
        .append_child(home, "user", NodeKind::Directory)
        .unwrap();

    session.set_cwd(user).unwrap();
    assert_eq!(session.cwd_path(), "/home/user");

    session.set_cwd(root).unwrap();
    assert_eq!(session.cwd_path(), "/");
}

#[test]
fn test_config_builder_defaults() {
    let config = TreeConfig::builder().build().unwrap();
    assert_eq!(config, TreeConfig::default());
    assert_eq!(config.max_name_len, 63);
    assert_eq!(config.max_path_len, 255);
}

#[test]
fn test_config_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_name_len = 8").unwrap();
    writeln!(file, "name_policy = \"reject\"").unwrap();
    writeln!(file, "unique_across_kinds = true").unwrap();

    let config = TreeConfig::load(file.path()).unwrap();
    assert_eq!(config.max_name_len, 8);
    assert_eq!(config.name_policy, NamePolicy::Reject);
    assert!(config.unique_across_kinds);

    assert!(matches!(
        config.bound_name("much-too-long"),
        Err(FsError::NameTooLong { max: 8, .. })
    ));
}

#[test]
fn test_config_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = TreeConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_config_load_malformed() {
    let err = TreeConfig::from_toml_str("max_name_len = \"many\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
