//! Command executor with unified outcome handling.

use std::fmt;

use strum::IntoEnumIterator;

use nodefs_core::{FsError, FsResult, NodeKind, NodeSnapshot, Session, TreeStats};

use crate::create::{create_file, make_directory};
use crate::navigate::{Listing, change_dir, list_directory, working_dir};
use crate::operation::{Command, CommandName};

/// Deepest tree `tree --json` will export; serialization recurses per level.
pub const MAX_EXPORT_DEPTH: u32 = 256;

/// Rendered form of the whole namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeView {
    /// `(depth, name, kind)` in pre-order, root first.
    pub lines: Vec<(u32, String, NodeKind)>,
    /// Nested snapshot for JSON output.
    pub snapshot: Option<NodeSnapshot>,
    pub stats: TreeStats,
    pub json: bool,
}

/// Result of executing one command.
///
/// `Display` renders the user-visible status text; it is empty for
/// outcomes that print nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A node was created at `path`.
    Created { command: CommandName, path: String },
    /// The working directory changed.
    Moved { cwd: String },
    /// Current working directory.
    WorkingDir(String),
    /// Contents of one directory.
    Listing(Listing),
    /// The whole namespace.
    Tree(TreeView),
    /// Command help.
    Menu,
    /// The session should end.
    Quit,
    /// The command failed and the namespace is unchanged.
    Failed { command: CommandName, error: FsError },
}

impl Outcome {
    /// Check if this outcome is a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Check if the session should end.
    pub fn is_quit(&self) -> bool {
        matches!(self, Self::Quit)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { command, path } => write!(
                f,
                "{} SUCCESS: node {path} successfully created",
                command.label()
            ),
            // Resolver failures are reported without the command prefix.
            Self::Failed { error, .. } if error.is_resolution_error() => {
                write!(f, "ERROR: {error}")
            }
            Self::Failed { command, error } => write!(f, "{} ERROR: {error}", command.label()),
            Self::Moved { .. } | Self::Quit => Ok(()),
            Self::WorkingDir(path) => f.write_str(path),
            Self::Listing(listing) => {
                let mut first = true;
                for entry in &listing.entries {
                    if !first {
                        writeln!(f)?;
                    }
                    first = false;
                    write!(f, "{} {}", entry.kind.tag(), entry.name)?;
                }
                Ok(())
            }
            Self::Tree(view) if view.json => {
                let json = serde_json::to_string_pretty(&view.snapshot).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            Self::Tree(view) => {
                for (depth, name, kind) in &view.lines {
                    let indent = "  ".repeat(*depth as usize);
                    match (depth, kind) {
                        (0, _) => writeln!(f, "/")?,
                        (_, NodeKind::Directory) => writeln!(f, "{indent}{name}/")?,
                        (_, NodeKind::File) => writeln!(f, "{indent}{name}")?,
                    }
                }
                write!(
                    f,
                    "{}, {}",
                    counted(view.stats.total_dirs, "directory", "directories"),
                    counted(view.stats.total_files, "file", "files")
                )
            }
            Self::Menu => {
                let usages: Vec<&str> = CommandName::iter().map(|c| c.usage()).collect();
                f.write_str(&usages.join("\n"))
            }
        }
    }
}

/// Running totals across executed commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Executes parsed commands against a session.
#[derive(Debug, Default)]
pub struct Executor {
    summary: ExecutionSummary,
}

impl Executor {
    /// Create a new executor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals so far.
    pub fn summary(&self) -> ExecutionSummary {
        self.summary
    }

    /// Execute one command. Failures are returned as [`Outcome::Failed`].
    pub fn execute(&mut self, session: &mut Session, command: Command) -> Outcome {
        let name = command.name();
        let result = match command {
            Command::Mkdir { path } => {
                make_directory(session, &path).map(|_| Outcome::Created { command: name, path })
            }
            Command::Creat { path } => {
                create_file(session, &path).map(|_| Outcome::Created { command: name, path })
            }
            Command::Cd { path } => change_dir(session, path.as_deref()).map(|_| Outcome::Moved {
                cwd: working_dir(session),
            }),
            Command::Pwd => Ok(Outcome::WorkingDir(working_dir(session))),
            Command::Ls { path } => list_directory(session, path.as_deref()).map(Outcome::Listing),
            Command::Tree { json } => tree_view(session, json).map(Outcome::Tree),
            Command::Menu => Ok(Outcome::Menu),
            Command::Quit => Ok(Outcome::Quit),
        };

        match result {
            Ok(outcome) => {
                self.summary.succeeded += 1;
                tracing::info!(command = %name, "command succeeded");
                outcome
            }
            Err(error) => {
                self.summary.failed += 1;
                tracing::warn!(command = %name, %error, "command failed");
                Outcome::Failed {
                    command: name,
                    error,
                }
            }
        }
    }
}

fn tree_view(session: &Session, json: bool) -> FsResult<TreeView> {
    let tree = session.tree();
    let stats = tree.stats();

    let snapshot = if json {
        if stats.max_depth > MAX_EXPORT_DEPTH {
            return Err(FsError::TooDeep {
                depth: stats.max_depth,
                max: MAX_EXPORT_DEPTH,
            });
        }
        tree.snapshot(tree.root())
    } else {
        None
    };

    Ok(TreeView {
        lines: tree
            .walk()
            .map(|(depth, node)| (depth, node.name.to_string(), node.kind))
            .collect(),
        snapshot,
        stats,
        json,
    })
}

/// `"1 file"`, `"2 files"`.
fn counted(n: u64, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}
