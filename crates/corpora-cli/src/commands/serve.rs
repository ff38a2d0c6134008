//! Web server command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use corpora_embedding::OllamaClient;
use corpora_graph::OntologyRepository;
use corpora_web::AppState;

use crate::config::AppConfig;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path used with --log
    #[arg(long, default_value = "logs/corpora-serve.log")]
    pub log_file: PathBuf,
}

pub async fn execute(args: ServeArgs, config: &AppConfig) -> Result<()> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    let db_path = &config.database.path;
    let pool = corpora_db::init_pool(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    let store = corpora_graph::open_store(&config.graph)
        .await
        .with_context(|| format!("Failed to connect to graph store at {}", config.graph.uri))?;
    let ontology = OntologyRepository::new(store);
    let embedder = OllamaClient::new(&config.embedding);

    if !embedder.health_check().await {
        tracing::warn!(url = %config.embedding.url, model = %config.embedding.model, "Ollama not reachable; /api/embedding/generate will fail");
    }

    println!();
    println!("  {} {}", "Corpora".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}       http://{}:{}/api", "API".green(), host, port);
    println!("  {}    http://{}:{}/health", "Health".green(), host, port);
    println!("  {}  {}", "Database".green(), db_path.display());
    println!("  {}     {}", "Graph".green(), config.graph.uri);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    let state = AppState::new(Arc::new(pool), ontology, embedder);
    corpora_web::run_server(state, &host, port).await?;

    Ok(())
}
