//! Text route handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use corpora_core::text::model::{NewText, Text, TextPatch};
use serde_json::{json, Value};

use super::{core_error, ApiResult, IdQuery};
use crate::state::AppState;

pub async fn get_text(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Json<Text>> {
    let id = query.require()?;
    let text = corpora_core::text::get_text(&state.db, id).map_err(core_error)?;
    Ok(Json(text))
}

pub async fn create_text(
    State(state): State<AppState>,
    Json(req): Json<NewText>,
) -> ApiResult<(StatusCode, Json<Text>)> {
    let text = corpora_core::text::create_text(&state.db, &req).map_err(core_error)?;
    Ok((StatusCode::CREATED, Json(text)))
}

pub async fn update_text(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Json(req): Json<TextPatch>,
) -> ApiResult<Json<Text>> {
    let id = query.require()?;
    let text = corpora_core::text::update_text(&state.db, id, &req).map_err(core_error)?;
    Ok(Json(text))
}

pub async fn delete_text(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Json<Value>> {
    let id = query.require()?;
    let deleted = corpora_core::text::delete_text(&state.db, id).map_err(core_error)?;
    Ok(Json(json!({ "deleted": deleted })))
}
