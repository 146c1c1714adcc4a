use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "memo",
    about = concat!("memo v", env!("CARGO_PKG_VERSION"), " - a terminal memo viewer"),
    version,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Memo file to open in the TUI (same as `memo open FILE`)
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: memo.toml next to the memo file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a memo file in the TUI
    Open(OpenArgs),
    /// List memos, most recently updated first
    List(ListArgs),
    /// Show one memo
    Show(ShowArgs),
    /// Delete a memo from the session (the file is left untouched)
    Delete(DeleteArgs),
}

impl Cli {
    /// The memo file this invocation works on
    pub fn memo_file(&self) -> Option<&std::path::Path> {
        match &self.command {
            Some(Commands::Open(args)) => Some(&args.file),
            Some(Commands::List(args)) => Some(&args.file),
            Some(Commands::Show(args)) => Some(&args.file),
            Some(Commands::Delete(args)) => Some(&args.file),
            None => self.file.as_deref(),
        }
    }

    /// True when this invocation runs the TUI
    pub fn is_tui(&self) -> bool {
        matches!(self.command, None | Some(Commands::Open(_)))
    }
}

#[derive(Args)]
pub struct OpenArgs {
    /// Memo file (JSON)
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ListArgs {
    /// Memo file (JSON)
    pub file: PathBuf,
    /// Only memos in this category
    #[arg(long)]
    pub category: Option<String>,
    /// Only memos with this tag
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Memo file (JSON)
    pub file: PathBuf,
    /// Memo ID to show
    pub id: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Memo file (JSON)
    pub file: PathBuf,
    /// Memo ID to delete
    pub id: String,
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}
