//! Core types for nodefs.
//!
//! This crate provides the in-memory namespace used throughout nodefs:
//! nodes stored in an arena, the session holding the current working
//! directory, configuration, and error types.

mod config;
mod error;
mod node;
mod session;
mod tree;

pub use config::{
    DEFAULT_MAX_NAME_LEN, DEFAULT_MAX_PATH_LEN, NamePolicy, TreeConfig, TreeConfigBuilder,
};
pub use error::{ConfigError, FsError, FsResult};
pub use node::{Node, NodeId, NodeKind};
pub use session::Session;
pub use tree::{Children, NodeSnapshot, NodeTree, TreeStats, Walk};
