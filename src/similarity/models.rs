// Result types returned by the scorer.
//
// Serialized with camelCase keys so the HTTP payload matches what the game
// client reads: { similarity, rank, wordSimilarities: [{ word, similarity, targetWord }] }.

use serde::{Deserialize, Serialize};

use super::rank::{calculate_rank, BEST_RANK, WORST_RANK};
use super::round2;

/// How a result was produced. Not part of the wire payload; callers use it
/// to tell semantic scores from degraded ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringPath {
    /// Either word list was empty after filtering.
    #[default]
    Empty,
    /// Positional case-insensitive match; no provider calls.
    ExactMatch,
    /// Cosine similarity over provider embeddings.
    Embedding,
    /// Random stand-in scores; the provider was unavailable or failed.
    Fallback,
}

/// One guessed word and the target word it scored best against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSimilarity {
    pub word: String,
    /// 0-100, two decimal places.
    pub similarity: f64,
    pub target_word: String,
}

/// Aggregate result for one guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResult {
    /// Mean of the per-word similarities, 0-100, two decimal places.
    pub similarity: f64,
    /// 1 (best) to 1000 (worst), derived from `similarity`.
    pub rank: u32,
    pub word_similarities: Vec<WordSimilarity>,
    #[serde(skip)]
    pub path: ScoringPath,
}

impl SimilarityResult {
    /// The result for a request with nothing to score.
    pub fn zero() -> Self {
        Self {
            similarity: 0.0,
            rank: WORST_RANK,
            word_similarities: Vec::new(),
            path: ScoringPath::Empty,
        }
    }

    /// Every guess word matched its positional target word.
    pub fn perfect(targets: &[String], guesses: &[String]) -> Self {
        let word_similarities = targets
            .iter()
            .zip(guesses)
            .map(|(target, guess)| WordSimilarity {
                word: guess.clone(),
                similarity: 100.0,
                target_word: target.clone(),
            })
            .collect();

        Self {
            similarity: 100.0,
            rank: BEST_RANK,
            word_similarities,
            path: ScoringPath::ExactMatch,
        }
    }

    /// Aggregate per-word scores: mean, rounded to two decimals, then ranked.
    pub fn from_words(word_similarities: Vec<WordSimilarity>, path: ScoringPath) -> Self {
        if word_similarities.is_empty() {
            return Self::zero();
        }

        let total: f64 = word_similarities.iter().map(|w| w.similarity).sum();
        let similarity = round2(total / word_similarities.len() as f64).clamp(0.0, 100.0);

        Self {
            similarity,
            rank: calculate_rank(similarity),
            word_similarities,
            path,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.path == ScoringPath::Fallback
    }
}
