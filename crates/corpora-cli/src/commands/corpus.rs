//! Corpus CLI commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use corpora_core::corpus::model::NewCorpus;

use crate::config::AppConfig;
use crate::output;

#[derive(Subcommand)]
pub enum CorpusCommands {
    /// List all corpora
    List,

    /// Show a corpus and its texts
    Show {
        /// Corpus id
        id: i64,
    },

    /// Create a corpus
    Create {
        /// Corpus title
        title: String,
        /// Genre
        #[arg(long, default_value = "")]
        genre: String,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a corpus and its texts
    Delete {
        /// Corpus id
        id: i64,
    },
}

pub fn execute(cmd: CorpusCommands, config: &AppConfig) -> Result<()> {
    let pool = corpora_db::init_pool(&config.database.path)?;

    match cmd {
        CorpusCommands::List => {
            let corpora = corpora_core::corpus::list_corpora(&pool)?;
            output::print_corpora_table(&corpora);
        }
        CorpusCommands::Show { id } => {
            let corpus = corpora_core::corpus::get_corpus(&pool, id)?;
            output::print_corpus(&corpus);
        }
        CorpusCommands::Create {
            title,
            genre,
            description,
        } => {
            let corpus = corpora_core::corpus::create_corpus(
                &pool,
                &NewCorpus {
                    title,
                    description,
                    genre,
                },
            )?;
            println!(
                "{} Created corpus {} {}",
                "✓".green().bold(),
                corpus.title.cyan(),
                format!("(#{})", corpus.id).dimmed()
            );
        }
        CorpusCommands::Delete { id } => {
            corpora_core::corpus::delete_corpus(&pool, id)?;
            println!("{} Deleted corpus #{}", "✓".green().bold(), id);
        }
    }
    Ok(())
}
