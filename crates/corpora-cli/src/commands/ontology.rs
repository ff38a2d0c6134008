//! Ontology graph CLI commands.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use corpora_graph::OntologyRepository;

use crate::config::AppConfig;
use crate::output;

#[derive(Subcommand)]
pub enum OntologyCommands {
    /// Print each parent class with its ancestors
    Tree {
        /// Maximum depth to print
        #[arg(long, default_value = "8")]
        depth: usize,
    },

    /// Show a class with its parents, children and objects
    Class {
        /// Class uri
        uri: String,
    },

    /// Show the attributes declared on a class
    Signature {
        /// Class uri
        uri: String,
    },

    /// Create a class
    AddClass {
        /// Class title
        title: String,
        /// Class description
        #[arg(long)]
        description: Option<String>,
        /// Parent class uri
        #[arg(long)]
        parent: Option<String>,
    },

    /// Delete a class and everything below it
    DeleteClass {
        /// Class uri
        uri: String,
    },

    /// Show class and object counts
    Status,
}

pub async fn execute(cmd: OntologyCommands, config: &AppConfig) -> Result<()> {
    let store = corpora_graph::open_store(&config.graph)
        .await
        .with_context(|| format!("Failed to connect to graph store at {}", config.graph.uri))?;
    let repo = OntologyRepository::new(store);

    match cmd {
        OntologyCommands::Tree { depth } => cmd_tree(&repo, depth).await,
        OntologyCommands::Class { uri } => cmd_class(&repo, &uri).await,
        OntologyCommands::Signature { uri } => cmd_signature(&repo, &uri).await,
        OntologyCommands::AddClass {
            title,
            description,
            parent,
        } => {
            let class = repo
                .create_class(&title, description.as_deref(), parent.as_deref())
                .await?;
            println!("{} Created class {} {}", "✓".green().bold(), class.title.cyan(), class.uri.dimmed());
            Ok(())
        }
        OntologyCommands::DeleteClass { uri } => {
            repo.delete_class(&uri).await?;
            println!("{} Deleted class {}", "✓".green().bold(), uri.yellow());
            Ok(())
        }
        OntologyCommands::Status => cmd_status(&repo).await,
    }
}

async fn cmd_tree(repo: &OntologyRepository, max_depth: usize) -> Result<()> {
    let entries = repo.get_ontology_parent_classes().await?;
    if entries.is_empty() {
        println!("{}", "No classes found.".dimmed());
        return Ok(());
    }

    // Depth-first, ancestors printed right under the class.
    let mut stack: Vec<(corpora_graph::ontology::Class, usize)> =
        entries.into_iter().rev().map(|c| (c, 0)).collect();
    while let Some((class, depth)) = stack.pop() {
        output::print_class_line(&class, depth);
        if depth + 1 >= max_depth {
            continue;
        }
        let parents = repo.get_class_parents(&class.uri).await?;
        stack.extend(parents.into_iter().rev().map(|c| (c, depth + 1)));
    }
    Ok(())
}

async fn cmd_class(repo: &OntologyRepository, uri: &str) -> Result<()> {
    let class = repo
        .get_class(uri)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Class not found: {}", uri))?;

    let parents = repo.get_class_parents(uri).await?;
    let children = repo.get_class_children(uri).await?;
    let objects = repo.get_class_objects(uri).await?;
    output::print_class(&class, &parents, &children, &objects);
    Ok(())
}

async fn cmd_signature(repo: &OntologyRepository, uri: &str) -> Result<()> {
    if repo.get_class(uri).await?.is_none() {
        anyhow::bail!("Class not found: {}", uri);
    }
    let signature = repo.collect_signature(uri).await?;
    output::print_signature(&signature);
    Ok(())
}

async fn cmd_status(repo: &OntologyRepository) -> Result<()> {
    let ontology = repo.get_ontology().await?;
    let parents = repo.get_ontology_parent_classes().await?;

    println!("{}", "Ontology".bold());
    println!("{}", "─".repeat(30));
    println!("  Classes:       {}", ontology.classes.len().to_string().cyan());
    println!("  Parent classes: {}", parents.len().to_string().cyan());
    println!("  Objects:       {}", ontology.objects.len().to_string().cyan());
    Ok(())
}
