//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "todo", version, about = "Keep a local todo list")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the todo database and logs (default: ./.todo).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level written to <data-dir>/logs (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a todo; blank titles are ignored.
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// List todos in insertion order.
    List {
        #[arg(long, value_enum, default_value = "all")]
        show: ListFilter,
    },
    /// Flip a todo between pending and completed.
    Toggle { id: String },
    /// Replace a todo's title.
    Edit {
        id: String,
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Delete a todo.
    Remove { id: String },
    /// Delete every completed todo.
    ClearCompleted,
    /// Print pending and completed counts.
    Stats,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ListFilter {
    All,
    Pending,
    Completed,
}
