//! Object route handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use corpora_graph::ontology::entities::rel;
use corpora_graph::ontology::{NewObject, Object, ObjectPatch, RelationDirection, RelationParam};
use corpora_graph::Node;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{graph_error, not_found, ApiResult, UriQuery};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateObjectRequest {
    pub params: NewObject,
    #[serde(default)]
    pub relations: Vec<RelationParam>,
    /// Shorthand for an outgoing `rdf__type` relation.
    pub class_uri: Option<String>,
}

impl CreateObjectRequest {
    fn relations(&self) -> Vec<RelationParam> {
        let mut relations = self.relations.clone();
        if let Some(class_uri) = self.class_uri.as_deref().filter(|c| !c.is_empty()) {
            let typed = relations.iter().any(|r| {
                r.direction == RelationDirection::Outgoing
                    && r.rel_type == rel::RDF_TYPE
                    && r.value_uri == class_uri
            });
            if !typed {
                relations.insert(0, RelationParam::outgoing(rel::RDF_TYPE, class_uri));
            }
        }
        relations
    }
}

#[derive(Deserialize)]
pub struct UpdateObjectRequest {
    pub uri: String,
    #[serde(default)]
    pub params: ObjectPatch,
}

pub async fn get_object(
    State(state): State<AppState>,
    Query(query): Query<UriQuery>,
) -> ApiResult<Json<Object>> {
    let uri = query.require()?;
    let object = state
        .ontology
        .get_object(uri)
        .await
        .map_err(graph_error)?
        .ok_or_else(|| not_found("Object", uri))?;
    Ok(Json(object))
}

pub async fn create_object(
    State(state): State<AppState>,
    Json(req): Json<CreateObjectRequest>,
) -> ApiResult<(StatusCode, Json<Object>)> {
    let relations = req.relations();
    let object = state
        .ontology
        .create_object(req.params, &relations)
        .await
        .map_err(graph_error)?;
    Ok((StatusCode::CREATED, Json(object)))
}

pub async fn update_object(
    State(state): State<AppState>,
    Json(req): Json<UpdateObjectRequest>,
) -> ApiResult<Json<Node>> {
    let node = state
        .ontology
        .update_object(&req.uri, req.params)
        .await
        .map_err(graph_error)?
        .ok_or_else(|| not_found("Object", &req.uri))?;
    Ok(Json(node))
}

pub async fn delete_object(
    State(state): State<AppState>,
    Query(query): Query<UriQuery>,
) -> ApiResult<Json<Value>> {
    let uri = query.require()?;
    state.ontology.delete_object(uri).await.map_err(graph_error)?;
    Ok(Json(json!({ "deleted": uri })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_uri_becomes_type_relation() {
        let req: CreateObjectRequest = serde_json::from_value(json!({
            "params": {"uri": "o1", "title": "Rex"},
            "class_uri": "dog"
        }))
        .unwrap();
        let relations = req.relations();
        assert_eq!(relations, vec![RelationParam::outgoing("rdf__type", "dog")]);
    }

    #[test]
    fn test_class_uri_not_duplicated() {
        let req: CreateObjectRequest = serde_json::from_value(json!({
            "params": {"title": "Rex"},
            "class_uri": "dog",
            "relations": [
                {"direction": 0, "value_uri": "alice", "rel_type": "owns"},
                {"direction": 1, "value_uri": "dog", "rel_type": "rdf__type"}
            ]
        }))
        .unwrap();
        assert_eq!(req.relations().len(), 2);
    }
}
