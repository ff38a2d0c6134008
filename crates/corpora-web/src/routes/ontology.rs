//! Whole-ontology route handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use corpora_graph::ontology::{Class, Ontology, OntologySignatures};
use serde::Deserialize;

use super::{graph_error, ApiResult};
use crate::state::AppState;

/// Largest page served in one request.
const MAX_PAGE: usize = 1000;

#[derive(Deserialize)]
pub struct PageQuery {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

/// Full snapshot, or one page of it when `skip` or `limit` is given.
pub async fn get_ontology(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<Ontology>> {
    let ontology = match (page.skip, page.limit) {
        (None, None) => state.ontology.get_ontology().await,
        (skip, limit) => {
            let limit = limit.unwrap_or(MAX_PAGE).min(MAX_PAGE);
            state
                .ontology
                .get_ontology_page(skip.unwrap_or(0), limit)
                .await
        }
    }
    .map_err(graph_error)?;
    Ok(Json(ontology))
}

pub async fn get_parent_classes(State(state): State<AppState>) -> ApiResult<Json<Vec<Class>>> {
    let classes = state
        .ontology
        .get_ontology_parent_classes()
        .await
        .map_err(graph_error)?;
    Ok(Json(classes))
}

pub async fn get_signatures(State(state): State<AppState>) -> ApiResult<Json<OntologySignatures>> {
    let signatures = state
        .ontology
        .get_ontology_signatures()
        .await
        .map_err(graph_error)?;
    Ok(Json(signatures))
}
