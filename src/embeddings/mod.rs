// Embeddings: provider abstraction, the OpenAI HTTP provider, and the
// process-wide vector cache the scorer reads through.

pub mod cache;
pub mod openai;
pub mod traits;
