//! Command types and command-line parsing.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumMessage, EnumString};
use thiserror::Error;

use crate::path::ROOT_MARKER;

/// Name of a shell command, as typed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumMessage, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CommandName {
    #[strum(message = "mkdir PATH    create a directory")]
    Mkdir,
    #[strum(message = "creat PATH    create an empty file")]
    Creat,
    #[strum(message = "cd [PATH]     change the working directory")]
    Cd,
    #[strum(message = "pwd           print the working directory")]
    Pwd,
    #[strum(message = "ls [PATH]     list a directory")]
    Ls,
    #[strum(message = "tree [--json] print the whole namespace")]
    Tree,
    #[strum(message = "menu          show this help")]
    Menu,
    #[strum(message = "quit          leave the shell")]
    Quit,
}

impl CommandName {
    /// Upper-case label used as the status-line prefix.
    pub fn label(&self) -> String {
        self.to_string().to_uppercase()
    }

    /// One-line usage text.
    pub fn usage(&self) -> &'static str {
        self.get_message().unwrap_or_default()
    }
}

/// A parsed command ready for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Create a directory.
    Mkdir { path: String },
    /// Create an empty file.
    Creat { path: String },
    /// Change the working directory (`None` means the root).
    Cd { path: Option<String> },
    /// Print the working directory.
    Pwd,
    /// List a directory (`None` means the cwd).
    Ls { path: Option<String> },
    /// Print the whole namespace.
    Tree { json: bool },
    /// Show available commands.
    Menu,
    /// End the session.
    Quit,
}

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line held no command.
    #[error("empty command")]
    Empty,

    /// The first word is not a known command.
    #[error("unknown command: {name}")]
    UnknownCommand { name: String },

    /// The command does not accept this argument.
    #[error("{command}: unexpected argument {argument}")]
    UnexpectedArgument {
        command: CommandName,
        argument: String,
    },
}

impl Command {
    /// Create a mkdir command.
    pub fn mkdir(path: impl Into<String>) -> Self {
        Self::Mkdir { path: path.into() }
    }

    /// Create a creat command.
    pub fn creat(path: impl Into<String>) -> Self {
        Self::Creat { path: path.into() }
    }

    /// Create a cd command.
    pub fn cd(path: Option<impl Into<String>>) -> Self {
        Self::Cd {
            path: path.map(Into::into),
        }
    }

    /// Create an ls command.
    pub fn ls(path: Option<impl Into<String>>) -> Self {
        Self::Ls {
            path: path.map(Into::into),
        }
    }

    /// Name of this command.
    pub fn name(&self) -> CommandName {
        match self {
            Self::Mkdir { .. } => CommandName::Mkdir,
            Self::Creat { .. } => CommandName::Creat,
            Self::Cd { .. } => CommandName::Cd,
            Self::Pwd => CommandName::Pwd,
            Self::Ls { .. } => CommandName::Ls,
            Self::Tree { .. } => CommandName::Tree,
            Self::Menu => CommandName::Menu,
            Self::Quit => CommandName::Quit,
        }
    }

    /// Parse one input line.
    ///
    /// The first whitespace-separated word is the command, the second its
    /// path argument. Any further word is an unexpected argument. `mkdir` and `creat` without a path are parsed as the
    /// root marker so they report "no path provided".
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let word = words.next().ok_or(ParseError::Empty)?;
        let name = CommandName::from_str(word).map_err(|_| ParseError::UnknownCommand {
            name: word.to_string(),
        })?;
        let arg = words.next();

        let command = match name {
            CommandName::Mkdir => Self::mkdir(arg.unwrap_or(ROOT_MARKER)),
            CommandName::Creat => Self::creat(arg.unwrap_or(ROOT_MARKER)),
            CommandName::Cd => Self::cd(arg),
            CommandName::Ls => Self::ls(arg),
            CommandName::Tree => match arg {
                None => Self::Tree { json: false },
                Some("--json") => Self::Tree { json: true },
                Some(other) => return Err(unexpected(name, other)),
            },
            CommandName::Pwd | CommandName::Menu | CommandName::Quit => {
                if let Some(other) = arg {
                    return Err(unexpected(name, other));
                }
                match name {
                    CommandName::Pwd => Self::Pwd,
                    CommandName::Menu => Self::Menu,
                    _ => Self::Quit,
                }
            }
        };

        if let Some(extra) = words.next() {
            return Err(unexpected(name, extra));
        }

        Ok(command)
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn unexpected(command: CommandName, argument: &str) -> ParseError {
    ParseError::UnexpectedArgument {
        command,
        argument: argument.to_string(),
    }
}
