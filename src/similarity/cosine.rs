// Cosine similarity between embedding vectors, expressed as a percentage.

use anyhow::Result;

/// Cosine similarity scaled to -100..=100.
///
/// Returns 0.0 when either vector has zero norm. Vectors of different
/// lengths are an error: that means the provider and config disagree on
/// the embedding dimension, which no score can paper over.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        anyhow::bail!(
            "Embedding dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        );
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a * norm_b) * 100.0)
}
