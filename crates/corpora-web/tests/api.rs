use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use corpora_db::{migrations::run_migrations, DbPool};
use corpora_embedding::{OllamaClient, OllamaConfig};
use corpora_graph::{MemoryGraph, OntologyRepository};
use corpora_web::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let db = DbPool::in_memory().unwrap();
    run_migrations(&db).unwrap();
    let ontology = OntologyRepository::new(Arc::new(MemoryGraph::new()));
    let embedder = OllamaClient::new(&OllamaConfig::default());
    create_router(AppState::new(Arc::new(db), ontology, embedder))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_missing_identifier_is_bad_request() {
    let app = app();
    for uri in ["/api/corpus/get", "/api/text/get/", "/api/class/get/", "/api/object/get/"] {
        let (status, _) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
    let (status, _) = send(&app, Method::GET, "/api/corpus/get?id=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::DELETE, "/api/class/delete/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_corpus_and_text_lifecycle() {
    let app = app();

    let (status, corpus) = send(
        &app,
        Method::POST,
        "/api/corpus/create/",
        Some(json!({"title": "Poems", "genre": "poetry"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let corpus_id = corpus["id"].as_i64().unwrap();

    let (status, text) = send(
        &app,
        Method::POST,
        "/api/text/create/",
        Some(json!({"title": "Ode", "content": "O...", "corpus": corpus_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let text_id = text["id"].as_i64().unwrap();

    let (status, corpus) = send(&app, Method::GET, &format!("/api/corpus/get?id={corpus_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(corpus["texts"].as_array().unwrap().len(), 1);

    let (status, text) = send(
        &app,
        Method::PUT,
        &format!("/api/text/update/?id={text_id}"),
        Some(json!({"title": "Ode II"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text["title"], "Ode II");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/corpus/delete/?id={corpus_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &format!("/api/text/get/?id={text_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_text_requires_existing_corpus() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/text/create/",
        Some(json!({"title": "Lost", "content": "", "corpus": 42})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/text/create/",
        Some(json!({"title": "Lost", "content": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_class_hierarchy_and_signature() {
    let app = app();

    let (status, animal) = send(&app, Method::POST, "/api/class/create/", Some(json!({"title": "Animal"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let animal_uri = animal["uri"].as_str().unwrap().to_string();

    let (_, dog) = send(
        &app,
        Method::POST,
        "/api/class/create/",
        Some(json!({"title": "Dog", "parent_uri": animal_uri})),
    )
    .await;
    let dog_uri = dog["uri"].as_str().unwrap().to_string();

    let (status, parents) = send(&app, Method::GET, &format!("/api/class/parents/?uri={dog_uri}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parents[0]["uri"], animal_uri.as_str());

    let (_, parent_classes) = send(&app, Method::GET, "/api/ontology/parents/", None).await;
    assert_eq!(parent_classes.as_array().unwrap().len(), 1);
    assert_eq!(parent_classes[0]["uri"], dog_uri.as_str());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/class/attr/add/",
        Some(json!({"class_uri": dog_uri, "title": "breed"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, owner) = send(
        &app,
        Method::POST,
        "/api/class/obj_attr/add/",
        Some(json!({"class_uri": dog_uri, "attr_name": "kin", "range_class_uri": animal_uri})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(owner["range_class_uri"], animal_uri.as_str());

    let (status, signature) = send(&app, Method::GET, &format!("/api/class/signature/?uri={dog_uri}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(signature["datatype_properties"].as_array().unwrap().len(), 1);
    assert_eq!(signature["object_properties"].as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/class/parent/add/",
        Some(json!({"parent_uri": dog_uri, "target_uri": animal_uri})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/class/delete/?uri={animal_uri}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/api/class/get/?uri={dog_uri}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_class_update() {
    let app = app();
    let (_, class) = send(&app, Method::POST, "/api/class/create/", Some(json!({"title": "Cat"}))).await;
    let uri = class["uri"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/class/update/",
        Some(json!({"uri": uri, "params": {"title": "Felis"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Felis");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/class/update/",
        Some(json!({"uri": "missing", "params": {"title": "x"}})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/class/update/",
        Some(json!({"uri": uri, "params": {"title": null}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, class) = send(&app, Method::GET, &format!("/api/class/get/?uri={uri}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(class["title"], "Felis");
}

#[tokio::test]
async fn test_object_lifecycle() {
    let app = app();
    let (_, dog) = send(&app, Method::POST, "/api/class/create/", Some(json!({"title": "Dog"}))).await;
    let dog_uri = dog["uri"].as_str().unwrap().to_string();

    let (status, rex) = send(
        &app,
        Method::POST,
        "/api/object/create/",
        Some(json!({
            "params": {"uri": "o1", "title": "Rex"},
            "relations": [{"direction": 1, "value_uri": dog_uri, "rel_type": "rdf__type"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rex["class_uri"], dog_uri.as_str());

    let (_, objects) = send(&app, Method::GET, &format!("/api/class/objects/?uri={dog_uri}"), None).await;
    assert_eq!(objects[0]["uri"], "o1");

    let (status, node) = send(
        &app,
        Method::PUT,
        "/api/object/update/",
        Some(json!({"uri": "o1", "params": {"description": "good boy"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(node["props"]["description"], "good boy");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/object/update/",
        Some(json!({"uri": "o1", "params": {"uri": ""}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, ontology) = send(&app, Method::GET, "/api/ontology/get/", None).await;
    assert_eq!(ontology["classes"].as_array().unwrap().len(), 1);
    assert_eq!(ontology["objects"][0]["class_uri"], dog_uri.as_str());

    let (status, _) = send(&app, Method::DELETE, "/api/object/delete/?uri=o1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, "/api/object/get/?uri=o1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_object_with_missing_endpoint() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/object/create/",
        Some(json!({"params": {"title": "Rex"}, "class_uri": "nowhere"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chunk_and_compare() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/embedding/chunk/",
        Some(json!({"text": "abcdef", "max_chunk_size": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chunks"], json!(["abcd", "ef"]));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/embedding/compare/",
        Some(json!({"embedding1": [1.0, 0.0], "embedding2": [1.0, 0.0]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!((body["cosine_similarity"].as_f64().unwrap() - 1.0).abs() < 1e-6);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/embedding/compare/",
        Some(json!({"embedding1": [1.0], "embedding2": [1.0, 0.0]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
