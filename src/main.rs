//! nodefs - an in-memory namespace shell.
//!
//! Usage:
//!   nodefs                   Interactive shell on stdin
//!   nodefs --script FILE     Run commands from FILE
//!   nodefs --config FILE     Load namespace settings from TOML
//!   nodefs --help            Show help

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use nodefs_core::{NamePolicy, Session, TreeConfig};
use nodefs_ops::{Command, Executor, ParseError};

#[derive(Parser)]
#[command(
    name = "nodefs",
    version,
    about = "An in-memory hierarchical namespace shell",
    long_about = "nodefs keeps a simulated directory tree in memory.\n\n\
                  Type `menu` for the list of commands. Status lines go to \
                  stdout; prompts and logs go to stderr."
)]
struct Cli {
    /// Namespace settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Treat a file and a directory with the same name as a collision
    #[arg(long)]
    strict_names: bool,

    /// Reject over-length names and paths instead of truncating them
    #[arg(long)]
    reject_long_names: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let mut session = Session::new(config);

    match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Cannot open script {}", path.display()))?;
            run_shell(&mut session, BufReader::new(file), false)
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            run_shell(&mut session, stdin.lock(), interactive)
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Build the namespace config from the optional file plus flag overrides.
fn load_config(cli: &Cli) -> Result<TreeConfig> {
    let mut config = match &cli.config {
        Some(path) => TreeConfig::load(path)
            .with_context(|| format!("Invalid config {}", path.display()))?,
        None => TreeConfig::default(),
    };

    if cli.strict_names {
        config.unique_across_kinds = true;
    }
    if cli.reject_long_names {
        config.name_policy = NamePolicy::Reject;
    }

    tracing::debug!(?config, "namespace configured");
    Ok(config)
}

/// Read commands line by line until `quit` or end of input.
fn run_shell(session: &mut Session, input: impl BufRead, interactive: bool) -> Result<()> {
    let mut executor = Executor::new();
    let mut stdout = io::stdout().lock();

    if interactive {
        prompt(session)?;
    }

    for line in input.lines() {
        let line = line.context("Failed to read command")?;

        if !line.trim_start().starts_with('#') {
            match Command::parse(&line) {
                Ok(command) => {
                    let outcome = executor.execute(session, command);
                    if outcome.is_quit() {
                        break;
                    }
                    let text = outcome.to_string();
                    if !text.is_empty() {
                        writeln!(stdout, "{text}")?;
                    }
                }
                Err(ParseError::Empty) => {}
                Err(err) => writeln!(stdout, "ERROR: {err}")?,
            }
        }

        if interactive {
            prompt(session)?;
        }
    }

    let summary = executor.summary();
    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "session finished"
    );

    Ok(())
}

/// Print the shell prompt to stderr.
fn prompt(session: &Session) -> Result<()> {
    let mut stderr = io::stderr();
    write!(stderr, "{}$ ", session.cwd_path())?;
    stderr.flush()?;
    Ok(())
}
