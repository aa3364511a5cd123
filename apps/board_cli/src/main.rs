use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    BoardListOrchestrator, BoardListState, BoardTasksOrchestrator, BoardTasksState,
    GraphQlGateway, RemoteGateway,
};
use shared::domain::{BoardId, ColumnId, ItemId, STATUS_COLUMN_ID};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::{ensure_api_token, load_settings};

#[derive(Parser, Debug)]
#[command(name = "board_cli", about = "Inspect boards and move tasks between statuses")]
struct Cli {
    /// TOML settings file; defaults to ./board_sync.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List boards with per-status task counts.
    Boards,
    /// Show a board's tasks grouped by status.
    Tasks { board_id: String },
    /// Set a task's status label and show the refreshed board.
    SetStatus {
        board_id: String,
        item_id: String,
        status: String,
        #[arg(long, default_value = STATUS_COLUMN_ID)]
        column_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    ensure_api_token(&settings)?;
    let graphql = GraphQlGateway::new(&settings).context("failed to set up gateway")?;
    info!(endpoint = %graphql.endpoint(), "using remote endpoint");
    let gateway: Arc<dyn RemoteGateway> = Arc::new(graphql);

    match cli.command {
        Command::Boards => {
            let orchestrator = BoardListOrchestrator::new(gateway);
            orchestrator.fetch_boards().await;
            let state = orchestrator.state();
            print_boards(&state);
            fail_on_error(state.error())
        }
        Command::Tasks { board_id } => {
            let orchestrator = BoardTasksOrchestrator::new(gateway);
            orchestrator.load_tasks(&BoardId::from(board_id)).await;
            let state = orchestrator.state();
            print_tasks(&state);
            fail_on_error(state.error())
        }
        Command::SetStatus {
            board_id,
            item_id,
            status,
            column_id,
        } => {
            let orchestrator = BoardTasksOrchestrator::new(gateway);
            orchestrator
                .change_status(
                    &BoardId::from(board_id),
                    &ItemId::from(item_id),
                    &ColumnId::from(column_id),
                    &status,
                )
                .await;
            let state = orchestrator.state();
            print_tasks(&state);
            fail_on_error(state.error())
        }
    }
}

fn print_boards(state: &BoardListState) {
    if state.boards().is_empty() {
        println!("no boards");
    }
    for board in state.boards() {
        println!("{} ({}) tasks={}", board.name, board.id, board.total_tasks());
        for count in &board.status_counts {
            println!("  {}: {}", count.label, count.count);
        }
    }
}

fn print_tasks(state: &BoardTasksState) {
    for group in state.items_grouped_by_status().iter() {
        println!("{} ({})", group.label, group.tasks.len());
        for task in &group.tasks {
            println!("  [{}] {}", task.id, task.name);
        }
    }
    let labels: Vec<&str> = state
        .available_statuses()
        .iter()
        .map(|option| option.label.as_str())
        .collect();
    if !labels.is_empty() {
        println!("available statuses: {}", labels.join(", "));
    }
}

fn fail_on_error(error: Option<&str>) -> Result<()> {
    match error {
        Some(message) => bail!("{message}"),
        None => Ok(()),
    }
}
