//! Graph store error types.

use thiserror::Error;

/// Errors raised by the graph store and the ontology repository.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Neo4j error: {0}")]
    Driver(#[from] neo4rs::Error),

    #[error("Failed to decode graph value: {0}")]
    Decode(String),

    #[error("Cannot link '{from}' -> '{to}': endpoint not found")]
    EndpointNotFound { from: String, to: String },

    #[error("Adding '{parent}' as parent of '{child}' would create a cycle")]
    Cycle { parent: String, child: String },

    #[error("Query not supported by the in-memory graph: {0}")]
    UnsupportedQuery(String),

    #[error("Invalid input: {0}")]
    Invalid(String),
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Create a decode error.
    pub fn decode(msg: impl std::fmt::Display) -> Self {
        Self::Decode(msg.to_string())
    }
}
