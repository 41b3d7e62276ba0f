//! Clicker CLI - drive a play session from a recorded script.

mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clicker_core::{ProgressSnapshot, TaskCatalog};
use clicker_progress::GameSession;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clicker")]
#[command(about = "Tap-and-gesture clicker game core", long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the task catalog
    Tasks,
    /// Replay a raw input script through a fresh session
    Replay {
        /// Path to the script (JSON array of steps)
        script: PathBuf,
        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Tasks => {
            println!("Tasks ({})", TaskCatalog::list().len());
            for task in TaskCatalog::list() {
                println!("  {} | {}", task.id, task.title);
            }
        }
        Commands::Replay { script: path, json } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let inputs = script::parse(&text, chrono::Utc::now())?;
            info!("Replaying {} inputs from {}", inputs.len(), path.display());

            let (mut port, handle) = GameSession::spawn();
            for raw in &inputs {
                if let Some(event) = port.feed(raw)? {
                    debug!(?event, "Fed gesture");
                }
            }
            drop(port);

            let snapshot = handle.join().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_checklist(&snapshot);
            }
        }
    }

    Ok(())
}

fn print_checklist(snapshot: &ProgressSnapshot) {
    println!("Session {}", snapshot.session);
    println!("  Score: {}", snapshot.state.score);
    println!(
        "  Tasks: {}/{}",
        snapshot.state.completed.len(),
        TaskCatalog::list().len()
    );
    for task in TaskCatalog::list() {
        let mark = if snapshot.state.is_completed(task.id) { "x" } else { " " };
        println!("  [{}] {} | {}", mark, task.id, task.title);
    }
}
