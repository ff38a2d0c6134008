//! # Corpora Graph
//!
//! Ontology storage on a property graph.
//!
//! Provides the node/arc model, the [`GraphStore`] seam with a Neo4j
//! ([`GraphClient`]) and an in-process ([`MemoryGraph`]) implementation,
//! and the [`OntologyRepository`] built on top of them.

pub mod client;
mod convert;
pub mod error;
pub mod memory;
pub mod model;
pub mod ontology;
pub mod store;

use std::sync::Arc as Shared;

pub use client::{GraphClient, GraphConfig};
pub use error::{GraphError, GraphResult};
pub use memory::MemoryGraph;
pub use model::{Arc, Node, Properties, Record, RecordValue};
pub use ontology::OntologyRepository;
pub use store::{generate_uri, GraphQuery, GraphStore, Statement, DEFAULT_REL_TYPE};

/// Open the store selected by `config`: the in-process graph for
/// `memory://`, Neo4j otherwise.
pub async fn open_store(config: &GraphConfig) -> GraphResult<Shared<dyn GraphStore>> {
    if config.is_in_memory() {
        tracing::info!("Using in-memory graph store");
        return Ok(Shared::new(MemoryGraph::new()));
    }
    let client = GraphClient::connect(config).await?;
    Ok(Shared::new(client))
}
