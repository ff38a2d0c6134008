//! Corpora Web Server
//!
//! Axum-based REST API over the corpus store and the ontology graph.

pub mod routes;
pub mod state;

use axum::{
    routing::{delete, get, post, put, MethodRouter},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use routes::{classes, corpora, embedding, objects, ontology, texts};
pub use state::AppState;

/// Register `path` both with and without its trailing slash.
fn route(router: Router<AppState>, path: &str, handler: MethodRouter<AppState>) -> Router<AppState> {
    let trimmed = path.trim_end_matches('/');
    router
        .route(trimmed, handler.clone())
        .route(&format!("{}/", trimmed), handler)
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let table: Vec<(&str, MethodRouter<AppState>)> = vec![
        // Corpus
        ("/api/corpus/list", get(corpora::list_corpora)),
        ("/api/corpus/get", get(corpora::get_corpus)),
        ("/api/corpus/create", post(corpora::create_corpus)),
        ("/api/corpus/update", put(corpora::update_corpus)),
        ("/api/corpus/delete", delete(corpora::delete_corpus)),
        // Text
        ("/api/text/get", get(texts::get_text)),
        ("/api/text/create", post(texts::create_text)),
        ("/api/text/update", put(texts::update_text)),
        ("/api/text/delete", delete(texts::delete_text)),
        // Ontology
        ("/api/ontology/get", get(ontology::get_ontology)),
        ("/api/ontology/parents", get(ontology::get_parent_classes)),
        ("/api/ontology/signatures", get(ontology::get_signatures)),
        // Class
        ("/api/class/get", get(classes::get_class)),
        ("/api/class/parents", get(classes::get_class_parents)),
        ("/api/class/children", get(classes::get_class_children)),
        ("/api/class/objects", get(classes::get_class_objects)),
        ("/api/class/create", post(classes::create_class)),
        ("/api/class/update", put(classes::update_class)),
        ("/api/class/delete", delete(classes::delete_class)),
        ("/api/class/attr/add", post(classes::add_class_attribute)),
        ("/api/class/attr/delete", delete(classes::delete_class_attribute)),
        ("/api/class/obj_attr/add", post(classes::add_class_object_attribute)),
        ("/api/class/obj_attr/delete", delete(classes::delete_class_object_attribute)),
        ("/api/class/parent/add", post(classes::add_class_parent)),
        ("/api/class/signature", get(classes::collect_signature)),
        // Object
        ("/api/object/get", get(objects::get_object)),
        ("/api/object/create", post(objects::create_object)),
        ("/api/object/update", put(objects::update_object)),
        ("/api/object/delete", delete(objects::delete_object)),
        // Embedding
        ("/api/embedding/chunk", post(embedding::chunk_text)),
        ("/api/embedding/generate", post(embedding::generate_embeddings)),
        ("/api/embedding/compare", post(embedding::compare_embeddings)),
    ];

    let api = table
        .into_iter()
        .fold(Router::new(), |router, (path, handler)| route(router, path, handler));

    api.route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// Run the web server.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
