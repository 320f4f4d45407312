// Similarity scorer: maps target words and guessed words to a 0-100 score.
//
// The scorer owns its dependencies explicitly: an optional embedding
// provider (None means "no provider access", decided at construction) and
// a shared EmbeddingCache. Per request:
//
//   1. blank entries dropped; nothing left on either side -> zero result
//   2. positional case-insensitive match of every word -> perfect result
//   3. no provider -> fallback for the whole request
//   4. exact matches score 100; other guess words are embedded alongside
//      every target word (fetched concurrently) and take their best cosine
//   5. any embedding failure -> fallback for the whole request
//
// Only a dimension mismatch between two vectors escapes as an error.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::try_join_all;
use rand::Rng;
use tracing::{debug, warn};

use super::cosine::cosine_similarity;
use super::fallback::fallback_similarity;
use super::models::{ScoringPath, SimilarityResult, WordSimilarity};
use super::{filter_blank, round2};
use crate::config::{Config, DEFAULT_EMBEDDING_DIM};
use crate::embeddings::cache::EmbeddingCache;
use crate::embeddings::openai::OpenAiEmbedder;
use crate::embeddings::traits::EmbeddingProvider;

pub struct SimilarityScorer {
    provider: Option<Arc<dyn EmbeddingProvider>>,
    cache: EmbeddingCache,
    dimensions: usize,
}

impl SimilarityScorer {
    /// Compose a scorer from an optional provider and a cache.
    pub fn new(provider: Option<Arc<dyn EmbeddingProvider>>, cache: EmbeddingCache) -> Self {
        let dimensions = provider
            .as_ref()
            .map(|p| p.dimensions())
            .unwrap_or(DEFAULT_EMBEDDING_DIM);
        Self {
            provider,
            cache,
            dimensions,
        }
    }

    /// A scorer with no provider access. Every non-trivial request uses fallback scoring.
    pub fn without_provider(cache: EmbeddingCache) -> Self {
        Self::new(None, cache)
    }

    /// Build the scorer described by the configuration: the OpenAI provider
    /// when the config grants provider access, otherwise none.
    pub fn from_config(config: &Config, cache: EmbeddingCache) -> Result<Self> {
        let provider = OpenAiEmbedder::from_config(config)?
            .map(|p| Arc::new(p) as Arc<dyn EmbeddingProvider>);
        let mut scorer = Self::new(provider, cache);
        scorer.dimensions = config.embedding_dim;
        Ok(scorer)
    }

    pub fn has_provider_access(&self) -> bool {
        self.provider.is_some()
    }

    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Score `guess_words` against `target_words`.
    ///
    /// Provider trouble never surfaces here; the request is rescored with
    /// the fallback and a warning is logged. The only error is two
    /// embeddings of different lengths.
    pub async fn calculate_word_similarity<S: AsRef<str>>(
        &self,
        target_words: &[S],
        guess_words: &[S],
    ) -> Result<SimilarityResult> {
        let targets = filter_blank(target_words);
        let guesses = filter_blank(guess_words);

        if targets.is_empty() || guesses.is_empty() {
            return Ok(SimilarityResult::zero());
        }

        if is_positional_match(&targets, &guesses) {
            return Ok(SimilarityResult::perfect(&targets, &guesses));
        }

        let Some(provider) = self.provider.as_deref() else {
            warn!(
                reason = "no_provider_access",
                "Embedding provider unavailable; using fallback similarity"
            );
            return Ok(self.fallback(&targets, &guesses));
        };

        // Exact matches are settled up front and never embedded.
        let exact: Vec<Option<&String>> = guesses
            .iter()
            .map(|g| targets.iter().find(|t| t.to_lowercase() == g.to_lowercase()))
            .collect();

        let mut texts: Vec<&str> = Vec::new();
        if exact.iter().any(Option::is_none) {
            for text in targets.iter().chain(
                guesses
                    .iter()
                    .zip(&exact)
                    .filter(|(_, m)| m.is_none())
                    .map(|(g, _)| g),
            ) {
                if !texts.contains(&text.as_str()) {
                    texts.push(text);
                }
            }
        }

        let fetched = try_join_all(texts.iter().map(|t| self.fetch_embedding(provider, t))).await;
        let embeddings: HashMap<&str, Arc<Vec<f64>>> = match fetched {
            Ok(vectors) => texts.iter().copied().zip(vectors).collect(),
            Err(e) => {
                warn!(
                    reason = "provider_error",
                    error = %e,
                    "Embedding lookup failed; using fallback similarity"
                );
                return Ok(self.fallback(&targets, &guesses));
            }
        };

        let mut word_similarities = Vec::with_capacity(guesses.len());
        for (guess, matched) in guesses.iter().zip(&exact) {
            if let Some(target) = matched {
                word_similarities.push(WordSimilarity {
                    word: guess.clone(),
                    similarity: 100.0,
                    target_word: (*target).clone(),
                });
                continue;
            }

            let guess_vec = &embeddings[guess.as_str()];
            let mut best_similarity = 0.0;
            let mut best_target = &targets[0];
            for target in &targets {
                let similarity = cosine_similarity(guess_vec, &embeddings[target.as_str()])
                    .with_context(|| format!("Comparing {guess:?} with {target:?}"))?;
                if similarity > best_similarity {
                    best_similarity = similarity;
                    best_target = target;
                }
            }

            word_similarities.push(WordSimilarity {
                word: guess.clone(),
                similarity: round2(best_similarity).min(100.0),
                target_word: best_target.clone(),
            });
        }

        Ok(SimilarityResult::from_words(
            word_similarities,
            ScoringPath::Embedding,
        ))
    }

    /// Embedding for a single text, never failing.
    ///
    /// Blank text yields a zero vector. A cache hit returns immediately.
    /// On a miss the provider is called and the vector cached; if there is
    /// no provider or the call fails, a random unit vector is returned
    /// instead (and not cached). The scorer itself doesn't use this path:
    /// it needs to see failures to switch the request to fallback.
    pub async fn get_embedding(&self, text: &str) -> Arc<Vec<f64>> {
        let key = text.trim();
        if key.is_empty() {
            return Arc::new(vec![0.0; self.dimensions]);
        }

        if let Some(hit) = self.cache.get(key) {
            return hit;
        }

        let Some(provider) = self.provider.as_deref() else {
            debug!(text = key, "No embedding provider; substituting random vector");
            return Arc::new(substitute_embedding(self.dimensions, &mut rand::rng()));
        };

        match self.fetch_embedding(provider, key).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!(error = %e, text = key, "Embedding failed; substituting random vector");
                Arc::new(substitute_embedding(self.dimensions, &mut rand::rng()))
            }
        }
    }

    /// Cache-through provider lookup keyed by trimmed text.
    async fn fetch_embedding(
        &self,
        provider: &dyn EmbeddingProvider,
        text: &str,
    ) -> Result<Arc<Vec<f64>>> {
        let key = text.trim();
        if key.is_empty() {
            return Ok(Arc::new(vec![0.0; self.dimensions]));
        }

        if let Some(hit) = self.cache.get(key) {
            debug!(text = key, "Embedding cache hit");
            return Ok(hit);
        }

        debug!(text = key, model = provider.model_name(), "Embedding cache miss");
        let embedding = provider
            .embed(key)
            .await
            .with_context(|| format!("Failed to embed {key:?}"))?;

        Ok(self.cache.insert(key, embedding))
    }

    fn fallback(&self, targets: &[String], guesses: &[String]) -> SimilarityResult {
        let mut rng = rand::rng();
        fallback_similarity(targets, guesses, &mut rng)
    }
}

/// Same length and every word equal (ignoring case) at the same position.
fn is_positional_match(targets: &[String], guesses: &[String]) -> bool {
    targets.len() == guesses.len()
        && targets
            .iter()
            .zip(guesses)
            .all(|(t, g)| t.to_lowercase() == g.to_lowercase())
}

/// Random vector of the given dimension, normalized to unit length.
pub fn substitute_embedding<R: Rng>(dimensions: usize, rng: &mut R) -> Vec<f64> {
    let mut v: Vec<f64> = (0..dimensions).map(|_| rng.random_range(-1.0..1.0)).collect();
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in &mut v {
            *x /= norm;
        }
    }
    v
}
