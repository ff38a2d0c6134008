//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;

pub mod corpus;
pub mod migrate;
pub mod ontology;
pub mod serve;

/// Corpora - corpus store and ontology graph backend
#[derive(Parser)]
#[command(name = "corpora")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file (defaults to ./corpora.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(serve::ServeArgs),

    /// Create or upgrade the relational schema
    Migrate,

    /// Inspect and edit the ontology graph
    #[command(subcommand)]
    Ontology(ontology::OntologyCommands),

    /// Manage corpora
    #[command(subcommand)]
    Corpus(corpus::CorpusCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = AppConfig::load(self.config.as_deref())?;
        if self.verbose {
            tracing::debug!(?config.server, db = %config.database.path.display(), graph = %config.graph.uri, "Loaded config");
        }

        match self.command {
            Commands::Serve(args) => serve::execute(args, &config).await,
            Commands::Migrate => migrate::execute(&config),
            Commands::Ontology(cmd) => ontology::execute(cmd, &config).await,
            Commands::Corpus(cmd) => corpus::execute(cmd, &config),
        }
    }
}
