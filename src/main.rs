use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use roster_todos::{ConfigError, MemberDirectory, StaticDirectory, TodoConfig, TodoFilter, TodoStore, ViewState};
use tokio::sync::watch;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("load pipeline stopped before committing")]
    PipelineStopped,
}

#[derive(Parser, Debug)]
#[command(name = "roster-todos", about = "Browse roster members and their to-do lists")]
struct Cli {
    /// To-do endpoint, queried as `<url>?userId=<id>`.
    #[arg(long, env = "TODO_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "TODO_COMMIT_DELAY_MS")]
    commit_delay_ms: Option<u64>,

    /// JSON array of `{ "id", "name" }`; the built-in roster when absent.
    #[arg(long, env = "ROSTER_PATH")]
    roster: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the roster.
    Members,
    /// Select members in order and print the to-dos of the last one.
    Load {
        #[arg(required = true, num_args = 1..)]
        member_ids: Vec<i64>,
        /// Pause between selections; 0 fires them back to back.
        #[arg(long, default_value_t = 0)]
        pause_ms: u64,
        #[arg(long)]
        hide_completed: bool,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = TodoConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(ms) = cli.commit_delay_ms {
        config.commit_delay = Duration::from_millis(ms);
    }

    let directory = match &cli.roster {
        Some(path) => StaticDirectory::from_path(path)?,
        None => StaticDirectory::default_roster(),
    };
    tracing::info!(base_url = %config.base_url, members = directory.len(), "roster-todos configured");

    match cli.command {
        Command::Members => {
            run_members(&directory);
            Ok(())
        }
        Command::Load { member_ids, pause_ms, hide_completed, json } => {
            let store = TodoStore::from_config(Arc::new(directory), &config)?;
            let state = run_load(&store, &member_ids, Duration::from_millis(pause_ms)).await?;
            print_state(&state, TodoFilter::new(hide_completed), json)
        }
    }
}

fn run_members(directory: &StaticDirectory) {
    for member in directory.members() {
        println!("{:>4}  {}", member.id, member.name);
    }
}

async fn run_load(store: &TodoStore, member_ids: &[i64], pause: Duration) -> Result<ViewState, CliError> {
    let Some((last, earlier)) = member_ids.split_last() else {
        return Ok(store.snapshot());
    };

    let printer = tokio::spawn(print_transitions(store.subscribe()));
    for id in earlier {
        store.select(*id);
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
    }

    let mut rx = store.subscribe();
    store.select(*last);
    let state = wait_for_commit(&mut rx).await;
    printer.abort();
    state
}

/// Wait for a loading snapshot followed by its commit.
async fn wait_for_commit(rx: &mut watch::Receiver<ViewState>) -> Result<ViewState, CliError> {
    let mut seen_loading = false;
    loop {
        rx.changed().await.map_err(|_| CliError::PipelineStopped)?;
        let snapshot = rx.borrow_and_update().clone();
        if snapshot.is_loading() {
            seen_loading = true;
        } else if seen_loading {
            return Ok(snapshot);
        }
    }
}

async fn print_transitions(mut rx: watch::Receiver<ViewState>) {
    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();
        let member = snapshot.current_member().map_or_else(|| "-".to_string(), |m| m.name.clone());
        eprintln!(
            "loading={} member={member} todos={} error={}",
            snapshot.is_loading(),
            snapshot.todos().len(),
            snapshot.error_message().unwrap_or("-"),
        );
    }
}

fn print_state(state: &ViewState, filter: TodoFilter, json: bool) -> Result<(), CliError> {
    let visible = filter.apply(state.todos());

    if json {
        let rendered = serde_json::to_string_pretty(&serde_json::json!({
            "member": state.current_member(),
            "todos": visible,
            "error": state.error_message(),
        }))?;
        println!("{rendered}");
        return Ok(());
    }

    match state.current_member() {
        Some(member) => println!("{} ({})", member.name, member.id),
        None => println!("(no such member)"),
    }
    if let Some(error) = state.error_message() {
        eprintln!("{error}");
    }
    for todo in visible {
        let mark = if todo.complete { "x" } else { " " };
        println!("[{mark}] {:>4}  {}", todo.id, todo.title);
    }
    Ok(())
}
