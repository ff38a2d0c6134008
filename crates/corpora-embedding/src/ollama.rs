//! Ollama HTTP client for embedding generation.
//!
//! Uses the Ollama API at /api/embeddings, one request per text.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::similarity::normalize;

/// Default Ollama API URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default embedding model (multilingual, 768 dimensions).
pub const DEFAULT_MODEL: &str = "nomic-embed-text";

/// Where to reach Ollama and which model to ask for.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Ollama embedding client.
#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

impl OllamaClient {
    pub fn new(config: &OllamaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate an embedding vector for the given text.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&request)
            .send()
            .await
            .context("Failed to connect to Ollama")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Ollama API error ({}): {}", status, body);
        }

        let result: EmbeddingResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        debug!(dim = result.embedding.len(), "Generated embedding");

        Ok(result.embedding)
    }

    /// Unit-length embeddings for each text, in order.
    pub async fn embed_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            let mut embedding = self
                .embed(text.as_ref())
                .await
                .with_context(|| format!("Embedding text #{i} failed"))?;
            normalize(&mut embedding);
            out.push(embedding);
        }
        Ok(out)
    }

    /// Check if the Ollama service is up and the model is pulled.
    pub async fn health_check(&self) -> bool {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                let text = resp.text().await.unwrap_or_default();
                text.contains(&self.model)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config: OllamaConfig = serde_json::from_str(r#"{"model": "bge-m3"}"#).unwrap();
        assert_eq!(config.url, DEFAULT_OLLAMA_URL);
        assert_eq!(config.model, "bge-m3");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = OllamaClient::new(&OllamaConfig {
            url: "http://ollama:11434/".into(),
            ..Default::default()
        });
        assert_eq!(client.base_url, "http://ollama:11434");
        assert_eq!(client.model(), DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_embed_batch_empty_makes_no_requests() {
        let client = OllamaClient::new(&OllamaConfig {
            url: "http://127.0.0.1:9".into(),
            ..Default::default()
        });
        let none: [&str; 0] = [];
        assert!(client.embed_batch(&none).await.unwrap().is_empty());
    }
}
