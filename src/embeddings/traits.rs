// Embedding provider trait: the swap-ready abstraction.
//
// The default implementation calls OpenAI's embeddings endpoint. Tests plug
// in doubles that return fixed vectors or count calls, and the scorer is
// handed `None` instead of a provider when it has no provider access.

use anyhow::Result;
use async_trait::async_trait;

/// Trait for turning a word or short phrase into an embedding vector.
/// Implementations must be async because most providers are HTTP APIs.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text. Errors cover network failures, timeouts and
    /// responses without a vector.
    async fn embed(&self, text: &str) -> Result<Vec<f64>>;

    /// The model identifier sent with each request.
    fn model_name(&self) -> &str;

    /// The vector dimension this provider is expected to return.
    fn dimensions(&self) -> usize;
}
