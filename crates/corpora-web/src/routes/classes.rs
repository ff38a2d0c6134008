//! Class, hierarchy and attribute route handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use corpora_graph::ontology::{Class, ClassSignature, DatatypeProperty, Object, ObjectProperty};
use corpora_graph::Properties;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{graph_error, not_found, ApiResult, UriQuery};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateClassRequest {
    pub title: String,
    pub description: Option<String>,
    pub parent_uri: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateClassRequest {
    pub uri: String,
    #[serde(default)]
    pub params: Properties,
}

#[derive(Deserialize)]
pub struct AddAttributeRequest {
    pub class_uri: String,
    pub title: String,
}

#[derive(Deserialize)]
pub struct AddObjectAttributeRequest {
    pub class_uri: String,
    pub attr_name: String,
    pub range_class_uri: String,
}

#[derive(Deserialize)]
pub struct AddParentRequest {
    pub parent_uri: String,
    pub target_uri: String,
}

pub async fn get_class(
    State(state): State<AppState>,
    Query(query): Query<UriQuery>,
) -> ApiResult<Json<Class>> {
    let uri = query.require()?;
    let class = state
        .ontology
        .get_class(uri)
        .await
        .map_err(graph_error)?
        .ok_or_else(|| not_found("Class", uri))?;
    Ok(Json(class))
}

pub async fn get_class_parents(
    State(state): State<AppState>,
    Query(query): Query<UriQuery>,
) -> ApiResult<Json<Vec<Class>>> {
    let uri = query.require()?;
    let parents = state.ontology.get_class_parents(uri).await.map_err(graph_error)?;
    Ok(Json(parents))
}

pub async fn get_class_children(
    State(state): State<AppState>,
    Query(query): Query<UriQuery>,
) -> ApiResult<Json<Vec<Class>>> {
    let uri = query.require()?;
    let children = state.ontology.get_class_children(uri).await.map_err(graph_error)?;
    Ok(Json(children))
}

pub async fn get_class_objects(
    State(state): State<AppState>,
    Query(query): Query<UriQuery>,
) -> ApiResult<Json<Vec<Object>>> {
    let uri = query.require()?;
    let objects = state.ontology.get_class_objects(uri).await.map_err(graph_error)?;
    Ok(Json(objects))
}

pub async fn create_class(
    State(state): State<AppState>,
    Json(req): Json<CreateClassRequest>,
) -> ApiResult<(StatusCode, Json<Class>)> {
    let class = state
        .ontology
        .create_class(&req.title, req.description.as_deref(), req.parent_uri.as_deref())
        .await
        .map_err(graph_error)?;
    Ok((StatusCode::CREATED, Json(class)))
}

pub async fn update_class(
    State(state): State<AppState>,
    Json(req): Json<UpdateClassRequest>,
) -> ApiResult<Json<Class>> {
    let class = state
        .ontology
        .update_class(&req.uri, req.params)
        .await
        .map_err(graph_error)?
        .ok_or_else(|| not_found("Class", &req.uri))?;
    Ok(Json(class))
}

pub async fn delete_class(
    State(state): State<AppState>,
    Query(query): Query<UriQuery>,
) -> ApiResult<Json<Value>> {
    let uri = query.require()?;
    state.ontology.delete_class(uri).await.map_err(graph_error)?;
    Ok(Json(json!({ "deleted": uri })))
}

pub async fn add_class_attribute(
    State(state): State<AppState>,
    Json(req): Json<AddAttributeRequest>,
) -> ApiResult<(StatusCode, Json<DatatypeProperty>)> {
    let attr = state
        .ontology
        .add_class_attribute(&req.class_uri, &req.title)
        .await
        .map_err(graph_error)?;
    Ok((StatusCode::CREATED, Json(attr)))
}

pub async fn delete_class_attribute(
    State(state): State<AppState>,
    Query(query): Query<UriQuery>,
) -> ApiResult<Json<Value>> {
    let uri = query.require()?;
    state
        .ontology
        .delete_class_attribute(uri)
        .await
        .map_err(graph_error)?;
    Ok(Json(json!({ "deleted": uri })))
}

pub async fn add_class_object_attribute(
    State(state): State<AppState>,
    Json(req): Json<AddObjectAttributeRequest>,
) -> ApiResult<(StatusCode, Json<ObjectProperty>)> {
    let attr = state
        .ontology
        .add_class_object_attribute(&req.class_uri, &req.attr_name, &req.range_class_uri)
        .await
        .map_err(graph_error)?;
    Ok((StatusCode::CREATED, Json(attr)))
}

pub async fn delete_class_object_attribute(
    State(state): State<AppState>,
    Query(query): Query<UriQuery>,
) -> ApiResult<Json<Value>> {
    let uri = query.require()?;
    state
        .ontology
        .delete_class_object_attribute(uri)
        .await
        .map_err(graph_error)?;
    Ok(Json(json!({ "deleted": uri })))
}

pub async fn add_class_parent(
    State(state): State<AppState>,
    Json(req): Json<AddParentRequest>,
) -> ApiResult<Json<Value>> {
    let created = state
        .ontology
        .add_class_parent(&req.parent_uri, &req.target_uri)
        .await
        .map_err(graph_error)?;
    Ok(Json(json!({
        "parent_added": req.parent_uri,
        "target": req.target_uri,
        "created": created,
    })))
}

pub async fn collect_signature(
    State(state): State<AppState>,
    Query(query): Query<UriQuery>,
) -> ApiResult<Json<ClassSignature>> {
    let uri = query.require()?;
    if state.ontology.get_class(uri).await.map_err(graph_error)?.is_none() {
        return Err(not_found("Class", uri));
    }
    let signature = state.ontology.collect_signature(uri).await.map_err(graph_error)?;
    Ok(Json(signature))
}
