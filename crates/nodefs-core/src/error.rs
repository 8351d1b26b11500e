//! Error types for namespace operations.

use compact_str::CompactString;
use thiserror::Error;

use crate::node::NodeKind;

/// Errors that can occur while resolving or mutating the namespace.
///
/// Every variant is non-fatal: the operation that produced it left the tree
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// The root marker was given where a parent-relative target is required.
    #[error("no path provided")]
    NoPathProvided,

    /// An intermediate path segment does not name an existing directory.
    #[error("directory {component} does not exist")]
    ComponentNotFound { component: CompactString },

    /// The target name already exists under the resolved parent.
    #[error("{kind} {path} already exists")]
    AlreadyExists { path: String, kind: NodeKind },

    /// The arena could not grow to hold a new node.
    #[error("memory allocation failed")]
    AllocationFailure,

    /// The final path component names a file, not a directory.
    #[error("{path} is not a directory")]
    NotADirectory { path: String },

    /// A name exceeded the configured bound under the reject policy.
    #[error("name {name} exceeds {max} characters")]
    NameTooLong { name: String, max: usize },

    /// A path exceeded the configured bound under the reject policy.
    #[error("path of {len} characters exceeds {max} characters")]
    PathTooLong { len: usize, max: usize },

    /// The tree is nested deeper than a nested export can represent.
    #[error("tree is {depth} levels deep, export is limited to {max}")]
    TooDeep { depth: u32, max: u32 },
}

impl FsError {
    /// Create a component-not-found error.
    pub fn not_found(component: impl Into<CompactString>) -> Self {
        Self::ComponentNotFound {
            component: component.into(),
        }
    }

    /// Create an already-exists error naming the kind of the existing entry.
    pub fn exists(path: impl Into<String>, kind: NodeKind) -> Self {
        Self::AlreadyExists {
            path: path.into(),
            kind,
        }
    }

    /// Whether the error was raised by the path resolver rather than the
    /// operation that called it.
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, Self::ComponentNotFound { .. })
    }
}

/// Result alias for namespace operations.
pub type FsResult<T> = Result<T, FsError>;

/// Errors raised while building or loading a [`TreeConfig`](crate::TreeConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Builder validation failed.
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    /// Config file could not be read.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema.
    #[error("Malformed config: {0}")]
    Parse(#[from] toml::de::Error),
}
