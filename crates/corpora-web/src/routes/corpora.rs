//! Corpus route handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use corpora_core::corpus::model::{Corpus, CorpusPatch, NewCorpus};
use serde_json::{json, Value};

use super::{core_error, ApiResult, IdQuery};
use crate::state::AppState;

pub async fn list_corpora(State(state): State<AppState>) -> ApiResult<Json<Vec<Corpus>>> {
    let corpora = corpora_core::corpus::list_corpora(&state.db).map_err(core_error)?;
    Ok(Json(corpora))
}

pub async fn get_corpus(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Json<Corpus>> {
    let id = query.require()?;
    let corpus = corpora_core::corpus::get_corpus(&state.db, id).map_err(core_error)?;
    Ok(Json(corpus))
}

pub async fn create_corpus(
    State(state): State<AppState>,
    Json(req): Json<NewCorpus>,
) -> ApiResult<(StatusCode, Json<Corpus>)> {
    let corpus = corpora_core::corpus::create_corpus(&state.db, &req).map_err(core_error)?;
    Ok((StatusCode::CREATED, Json(corpus)))
}

pub async fn update_corpus(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Json(req): Json<CorpusPatch>,
) -> ApiResult<Json<Corpus>> {
    let id = query.require()?;
    let corpus = corpora_core::corpus::update_corpus(&state.db, id, &req).map_err(core_error)?;
    Ok(Json(corpus))
}

pub async fn delete_corpus(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Json<Value>> {
    let id = query.require()?;
    let deleted = corpora_core::corpus::delete_corpus(&state.db, id).map_err(core_error)?;
    Ok(Json(json!({ "deleted": deleted })))
}
