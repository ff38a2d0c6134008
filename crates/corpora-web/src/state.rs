//! Application state.

use std::sync::Arc;

use corpora_db::DbPool;
use corpora_embedding::OllamaClient;
use corpora_graph::OntologyRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub ontology: OntologyRepository,
    pub embedder: OllamaClient,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, ontology: OntologyRepository, embedder: OllamaClient) -> Self {
        Self {
            db,
            ontology,
            embedder,
        }
    }
}
