//! Command-line front-end for the todo core.
//!
//! # Responsibility
//! - Translate subcommands into `TodoStore` calls.
//! - Own process bootstrap: config, logging, database.

mod cli;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::{Cli, Command, ListFilter};
use log::info;
use todo_core::{
    init_logging, AppConfig, IgnoreReason, KvTodoRepository, MutationOutcome, SqliteKvStore,
    TodoId, TodoItem, TodoRepository, TodoStore,
};

const DEFAULT_DATA_DIR: &str = ".todo";

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    std::fs::create_dir_all(config.data_dir()).with_context(|| {
        format!(
            "failed to create data directory `{}`",
            config.data_dir().display()
        )
    })?;
    init_logging(config.log_level(), &config.log_dir())
        .map_err(|err| anyhow!("failed to start logging: {err}"))?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        todo_core::core_version()
    );

    let slot = SqliteKvStore::open(config.db_path()).context("failed to open todo database")?;
    let mut store = TodoStore::load(KvTodoRepository::new(slot));
    run(cli.command, &mut store);
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let data_dir = match &cli.data_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => cwd.join(dir),
        None => cwd.join(DEFAULT_DATA_DIR),
    };
    AppConfig::new(data_dir, cli.log_level.as_deref())
        .map_err(|err| anyhow!("invalid configuration: {err}"))
}

fn run<R: TodoRepository>(command: Command, store: &mut TodoStore<R>) {
    match command {
        Command::Add { title } => {
            let outcome = store.add(&title.join(" "));
            report(outcome, "added");
            if outcome.is_applied() {
                if let Some(todo) = store.all().last() {
                    println!("{}", render(todo));
                }
            }
        }
        Command::List { show } => {
            let todos: Vec<&TodoItem> = match show {
                ListFilter::All => store.all().iter().collect(),
                ListFilter::Pending => store.pending(),
                ListFilter::Completed => store.completed(),
            };
            for todo in todos {
                println!("{}", render(todo));
            }
        }
        Command::Toggle { id } => report(store.toggle_complete(&TodoId::from(id)), "toggled"),
        Command::Edit { id, title } => {
            report(store.update(&TodoId::from(id), &title.join(" ")), "updated")
        }
        Command::Remove { id } => report(store.remove(&TodoId::from(id)), "removed"),
        Command::ClearCompleted => println!("cleared {} completed", store.clear_completed()),
        Command::Stats => println!("{}", store.stats()),
    }
}

fn report(outcome: MutationOutcome, applied: &str) {
    match outcome {
        MutationOutcome::Applied => println!("{applied}"),
        MutationOutcome::Ignored(IgnoreReason::EmptyTitle) => println!("ignored: title is empty"),
        MutationOutcome::Ignored(IgnoreReason::NotFound) => println!("ignored: no such todo"),
    }
}

fn render(todo: &TodoItem) -> String {
    let mark = if todo.completed { 'x' } else { ' ' };
    format!(
        "[{mark}] {}  {}  ({})",
        todo.id,
        todo.title,
        todo.created_at.format("%Y-%m-%d %H:%M")
    )
}
