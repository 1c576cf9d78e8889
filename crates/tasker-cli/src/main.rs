//! Tasker CLI Application
//!
//! Command-line interface and MCP server for the AI-assisted task list.

mod args;
mod cli;
mod mcp;
mod renderer;

use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, TaskerMcpServer};
use renderer::TerminalRenderer;
use tasker_core::{
    GeminiClient, GeminiConfig, OfflineSuggestions, SuggestionClient, TaskerBuilder,
};
use Commands::*;

/// Picks the suggestion client: Gemini when a key is available, offline
/// otherwise.
fn suggestion_client(
    offline: bool,
    api_key: Option<String>,
    model: Option<String>,
) -> Arc<dyn SuggestionClient> {
    match api_key.filter(|key| !key.trim().is_empty()) {
        Some(key) if !offline => {
            let mut config = GeminiConfig::new(key);
            if let Some(model) = model {
                config = config.with_model(model);
            }
            info!("Task suggestions enabled with model {}", config.model);
            Arc::new(GeminiClient::new(config))
        }
        _ => {
            info!("Task suggestions disabled");
            Arc::new(OfflineSuggestions)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        offline,
        api_key,
        model,
        command,
    } = Args::parse();

    let tasker = TaskerBuilder::new()
        .with_database_path(database_file)
        .with_suggestion_client(suggestion_client(offline, api_key, model))
        .build()
        .await
        .context("Failed to initialize tasker")?;

    let cli = Cli::new(tasker.clone(), TerminalRenderer::new(!no_color));

    info!("Tasker started");

    match command {
        Some(Add(args)) => cli.add_task(args).await,
        Some(List(args)) => cli.list_tasks(args).await,
        Some(Show(args)) => cli.show_task(args).await,
        Some(Edit(args)) => cli.edit_task(args).await,
        Some(Toggle(args)) => cli.toggle_task(args).await,
        Some(Delete(args)) => cli.delete_task(args).await,
        Some(Stats) => cli.stats().await,
        Some(Categories) => cli.categories().await,
        Some(Sub { command }) => cli.handle_sub_task_command(command).await,
        Some(Serve) => {
            info!("Starting Tasker MCP server");
            run_stdio_server(TaskerMcpServer::new(tasker))
                .await
                .context("MCP server failed")
        }
        None => cli.list_tasks(Default::default()).await,
    }
}
