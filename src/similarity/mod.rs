// Word similarity: embedding-based scoring with a random fallback,
// rank banding, and proximity labels for "hot/cold" feedback.

pub mod cosine;
pub mod fallback;
pub mod models;
pub mod proximity;
pub mod rank;
pub mod scorer;

/// Split a free-text guess into words: trimmed, lowercased, split on any
/// run of whitespace. A blank guess yields no words.
pub fn split_guess(guess: &str) -> Vec<String> {
    guess
        .trim()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Trim every entry and drop the ones that are blank.
pub fn filter_blank<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.as_ref().trim())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
