//! Route handlers.
//!
//! Handlers answer with `(StatusCode, String)` on failure. Reads and
//! deletes take their identifier from the query string; a missing one is
//! a 400 before any store is touched.

pub mod classes;
pub mod corpora;
pub mod embedding;
pub mod objects;
pub mod ontology;
pub mod texts;

use axum::http::StatusCode;
use corpora_core::CorporaError;
use corpora_graph::GraphError;
use serde::Deserialize;

pub type ApiError = (StatusCode, String);
pub type ApiResult<T> = Result<T, ApiError>;

/// `?id=` of a relational record.
#[derive(Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    pub fn require(&self) -> ApiResult<i64> {
        let raw = self
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| (StatusCode::BAD_REQUEST, "Missing ?id=".to_string()))?;
        raw.parse()
            .map_err(|_| (StatusCode::BAD_REQUEST, format!("Invalid id: {}", raw)))
    }
}

/// `?uri=` of a graph node.
#[derive(Deserialize)]
pub struct UriQuery {
    pub uri: Option<String>,
}

impl UriQuery {
    pub fn require(&self) -> ApiResult<&str> {
        self.uri
            .as_deref()
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| (StatusCode::BAD_REQUEST, "Missing ?uri=".to_string()))
    }
}

pub fn core_error(err: CorporaError) -> ApiError {
    let status = match &err {
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        CorporaError::ValidationError(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

pub fn graph_error(err: GraphError) -> ApiError {
    let status = match &err {
        GraphError::EndpointNotFound { .. } => StatusCode::NOT_FOUND,
        GraphError::Cycle { .. } => StatusCode::CONFLICT,
        GraphError::Invalid(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

pub fn not_found(what: &str, key: &str) -> ApiError {
    (StatusCode::NOT_FOUND, format!("{} not found: {}", what, key))
}
