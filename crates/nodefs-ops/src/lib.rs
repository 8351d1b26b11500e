//! Namespace operations for nodefs.
//!
//! This crate resolves paths against a [`Session`](nodefs_core::Session),
//! creates directories and files, navigates the working directory, and
//! turns parsed shell commands into printable outcomes.
//!
//! # Example
//!
//! ```rust
//! use nodefs_core::Session;
//! use nodefs_ops::{Command, Executor};
//!
//! let mut session = Session::default();
//! let mut executor = Executor::new();
//!
//! let outcome = executor.execute(&mut session, Command::parse("mkdir /docs").unwrap());
//! assert_eq!(outcome.to_string(), "MKDIR SUCCESS: node /docs successfully created");
//! ```

mod create;
mod executor;
mod navigate;
mod operation;
pub mod path;

pub use create::{create_file, make_directory};
pub use executor::{ExecutionSummary, Executor, MAX_EXPORT_DEPTH, Outcome, TreeView};
pub use navigate::{ListEntry, Listing, change_dir, list_directory, working_dir};
pub use operation::{Command, CommandName, ParseError};
pub use path::{
    Components, ROOT_MARKER, Resolved, SEPARATOR, SplitPath, resolve, resolve_directory, split_path,
};

// Re-export core types for convenience
pub use nodefs_core::{FsError, FsResult, NodeId, NodeKind, Session, TreeConfig};
