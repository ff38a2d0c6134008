//! Chunking, embedding and comparison handlers.

use axum::{extract::State, http::StatusCode, Json};
use corpora_embedding::{chunk_texts, cosine_similarity, DEFAULT_CHUNK_SIZE};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ApiResult;
use crate::state::AppState;

/// A single text or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    One(String),
    Many(Vec<String>),
}

impl Default for TextInput {
    fn default() -> Self {
        TextInput::Many(Vec::new())
    }
}

impl TextInput {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            TextInput::One(text) => vec![text],
            TextInput::Many(texts) => texts,
        }
    }
}

#[derive(Deserialize)]
pub struct ChunkRequest {
    #[serde(default)]
    pub text: TextInput,
    pub max_chunk_size: Option<usize>,
}

#[derive(Serialize)]
pub struct ChunkResponse {
    pub chunks: Vec<String>,
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub texts: TextInput,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub embeddings: Vec<Vec<f32>>,
}

#[derive(Deserialize)]
pub struct CompareRequest {
    pub embedding1: Vec<f32>,
    pub embedding2: Vec<f32>,
}

#[derive(Serialize)]
pub struct CompareResponse {
    pub cosine_similarity: f32,
}

pub async fn chunk_text(Json(req): Json<ChunkRequest>) -> Json<ChunkResponse> {
    let size = req.max_chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
    Json(ChunkResponse {
        chunks: chunk_texts(&req.text.into_vec(), size),
    })
}

pub async fn generate_embeddings(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    let texts = req.texts.into_vec();
    let embeddings = state.embedder.embed_batch(&texts).await.map_err(|e| {
        warn!(error = %e, "Embedding generation failed");
        (StatusCode::BAD_GATEWAY, format!("{:#}", e))
    })?;
    Ok(Json(GenerateResponse { embeddings }))
}

pub async fn compare_embeddings(Json(req): Json<CompareRequest>) -> ApiResult<Json<CompareResponse>> {
    let similarity = cosine_similarity(&req.embedding1, &req.embedding2)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(Json(CompareResponse {
        cosine_similarity: similarity,
    }))
}
