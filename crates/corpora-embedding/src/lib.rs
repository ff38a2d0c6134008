//! # Corpora Embedding
//!
//! Text chunking, cosine similarity, and embedding generation via Ollama.

pub mod chunk;
pub mod ollama;
pub mod similarity;

pub use chunk::{chunk_texts, DEFAULT_CHUNK_SIZE};
pub use ollama::{OllamaClient, OllamaConfig};
pub use similarity::{cosine_similarity, normalize, SimilarityError};
