// OpenAI embeddings API implementation.
//
// POST {model, input} with bearer auth, read `data[0].embedding` back.
// Each call is a single bounded request: the reqwest client carries the
// configured timeout, and expiry surfaces as an ordinary error so the
// scorer can switch the request to fallback scoring.
//
// API docs: https://platform.openai.com/docs/api-reference/embeddings

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::EmbeddingProvider;
use crate::config::Config;

/// OpenAI (or API-compatible) embedding provider.
pub struct OpenAiEmbedder {
    client: Client,
    api_key: String,
    url: String,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbedder {
    /// Create a provider for the given endpoint, credential and model.
    pub fn new(
        url: &str,
        api_key: String,
        model: &str,
        dimensions: usize,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build embeddings HTTP client")?;

        Ok(Self {
            client,
            api_key,
            url: url.to_string(),
            model: model.to_string(),
            dimensions,
        })
    }

    /// Build the provider from configuration. Returns `None` when the config
    /// grants no provider access (flag off or blank credential).
    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        if !config.has_provider_access() {
            return Ok(None);
        }
        Self::new(
            &config.embedding_url,
            config.openai_api_key.clone(),
            &config.embedding_model,
            config.embedding_dim,
            config.embedding_timeout,
        )
        .map(Some)
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f64>> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to call embeddings API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Embeddings API returned {}: {}", status, body);
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .context("Failed to parse embeddings API response")?;

        let embedding = extract_embedding(body)?;

        debug!(
            model = %self.model,
            dim = embedding.len(),
            text = text,
            "Fetched embedding"
        );

        Ok(embedding)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Pull the first vector out of a response. An empty `data` array or an
/// empty vector both mean the provider returned nothing usable.
fn extract_embedding(response: EmbeddingResponse) -> Result<Vec<f64>> {
    let embedding = response
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .context("No embedding returned from embeddings API")?;

    if embedding.is_empty() {
        anyhow::bail!("Embeddings API returned an empty vector");
    }
    Ok(embedding)
}

// --- Embeddings API request/response types ---

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f64>,
}
