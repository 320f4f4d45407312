// Fallback similarity: used when embeddings can't be fetched.
//
// Keeps the result shape identical to the embedding path (one entry per
// guess word, mean aggregate, same rank formula) but the scores are
// stand-ins: exact matches get 100, everything else a random draw below 60.
// Results built here carry ScoringPath::Fallback so callers can tell.

use rand::Rng;

use super::models::{ScoringPath, SimilarityResult, WordSimilarity};
use super::round2;

/// Upper bound (exclusive) for a non-matching word's stand-in score.
pub const FALLBACK_CEILING: f64 = 60.0;

/// Score every guess word against the target words without embeddings.
///
/// For each guess word, targets are scanned in order: a case-insensitive
/// exact match scores 100 and ends the scan; otherwise each target gets a
/// draw in [0, 60) and the highest draw wins.
pub fn fallback_similarity<R: Rng>(
    target_words: &[String],
    guess_words: &[String],
    rng: &mut R,
) -> SimilarityResult {
    let word_similarities = guess_words
        .iter()
        .map(|guess| best_fallback_match(guess, target_words, rng))
        .collect();

    SimilarityResult::from_words(word_similarities, ScoringPath::Fallback)
}

fn best_fallback_match<R: Rng>(
    guess: &str,
    target_words: &[String],
    rng: &mut R,
) -> WordSimilarity {
    let mut best_similarity = 0.0;
    let mut best_target = target_words.first().cloned().unwrap_or_default();

    for target in target_words {
        if guess.to_lowercase() == target.to_lowercase() {
            best_similarity = 100.0;
            best_target = target.clone();
            break;
        }

        let similarity = rng.random_range(0.0..FALLBACK_CEILING);
        if similarity > best_similarity {
            best_similarity = similarity;
            best_target = target.clone();
        }
    }

    // Rounding can push 59.999 up to 60.0; keep stand-ins strictly below.
    let mut similarity = round2(best_similarity);
    if best_similarity < FALLBACK_CEILING && similarity >= FALLBACK_CEILING {
        similarity = FALLBACK_CEILING - 0.01;
    }

    WordSimilarity {
        word: guess.to_string(),
        similarity,
        target_word: best_target,
    }
}
