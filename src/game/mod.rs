// Guess rounds: the bookkeeping a Picktle game keeps around the scorer.
//
// A round holds the hidden target words and every scored guess, best first.
// The scorer does the work; the round only classifies and orders results.

use anyhow::Result;

use crate::similarity::models::SimilarityResult;
use crate::similarity::scorer::SimilarityScorer;
use crate::similarity::{filter_blank, split_guess};

/// Aggregate similarity at or above which a guess counts as close.
pub const CLOSE_THRESHOLD: f64 = 80.0;

/// How a single guess landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Aggregate similarity of exactly 100.
    Solved,
    /// At or above CLOSE_THRESHOLD.
    Close,
    Miss,
}

impl GuessOutcome {
    pub fn from_similarity(similarity: f64) -> Self {
        match similarity {
            s if s >= 100.0 => GuessOutcome::Solved,
            s if s >= CLOSE_THRESHOLD => GuessOutcome::Close,
            _ => GuessOutcome::Miss,
        }
    }
}

/// A scored guess as recorded in the round history.
#[derive(Debug, Clone)]
pub struct Guess {
    pub text: String,
    pub outcome: GuessOutcome,
    pub result: SimilarityResult,
}

/// One round of play against a fixed set of target words.
pub struct Round {
    target_words: Vec<String>,
    guesses: Vec<Guess>,
}

impl Round {
    /// Start a round. Blank target words are dropped; at least one must remain.
    pub fn new<S: AsRef<str>>(target_words: &[S]) -> Result<Self> {
        let target_words = filter_blank(target_words);
        if target_words.is_empty() {
            anyhow::bail!("A round needs at least one non-blank target word");
        }
        Ok(Self {
            target_words,
            guesses: Vec::new(),
        })
    }

    pub fn target_words(&self) -> &[String] {
        &self.target_words
    }

    /// Guess history, highest similarity first. Ties keep submission order.
    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    pub fn guess_count(&self) -> usize {
        self.guesses.len()
    }

    pub fn best(&self) -> Option<&Guess> {
        self.guesses.first()
    }

    pub fn is_solved(&self) -> bool {
        self.guesses
            .iter()
            .any(|g| g.outcome == GuessOutcome::Solved)
    }

    /// Score a free-text guess and record it.
    ///
    /// The guess is lowercased and split on whitespace. A blank guess, or one
    /// whose word count differs from the number of target words, is rejected
    /// and not recorded.
    pub async fn submit(&mut self, scorer: &SimilarityScorer, guess: &str) -> Result<Guess> {
        let words = split_guess(guess);
        if words.is_empty() {
            anyhow::bail!("Guess is empty");
        }
        let expected = self.target_words.len();
        if words.len() != expected {
            anyhow::bail!(
                "Please enter exactly {expected} word{}",
                if expected == 1 { "" } else { "s" }
            );
        }

        let result = scorer
            .calculate_word_similarity(&self.target_words, &words)
            .await?;

        let entry = Guess {
            text: words.join(" "),
            outcome: GuessOutcome::from_similarity(result.similarity),
            result,
        };

        self.guesses.push(entry.clone());
        self.guesses
            .sort_by(|a, b| b.result.similarity.total_cmp(&a.result.similarity));

        Ok(entry)
    }
}
