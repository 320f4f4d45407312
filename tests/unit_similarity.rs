// Scorer tests against in-process embedding providers.
//
// No network: every provider here is a test double. They cover the
// embedding path, whole-request fallback on provider failure, cache reuse,
// and the result invariants (entry count, score range, rank formula).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use picktle::embeddings::cache::EmbeddingCache;
use picktle::embeddings::traits::EmbeddingProvider;
use picktle::similarity::models::ScoringPath;
use picktle::similarity::proximity::proximity_label;
use picktle::similarity::scorer::SimilarityScorer;

/// Returns fixed vectors for known words and counts every call.
struct FixedEmbedder {
    vectors: HashMap<String, Vec<f64>>,
    calls: AtomicUsize,
}

impl FixedEmbedder {
    fn new(entries: &[(&str, Vec<f64>)]) -> Self {
        Self {
            vectors: entries
                .iter()
                .map(|(w, v)| (w.to_string(), v.clone()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for FixedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.vectors.get(text) {
            Some(v) => Ok(v.clone()),
            None => anyhow::bail!("no vector for {text:?}"),
        }
    }

    fn model_name(&self) -> &str {
        "fixed-test"
    }

    fn dimensions(&self) -> usize {
        3
    }
}

/// Every call fails, like an unreachable provider.
struct UnreachableEmbedder {
    calls: AtomicUsize,
}

impl UnreachableEmbedder {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for UnreachableEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        anyhow::bail!("connection refused")
    }

    fn model_name(&self) -> &str {
        "unreachable-test"
    }

    fn dimensions(&self) -> usize {
        3
    }
}

fn vocabulary() -> FixedEmbedder {
    FixedEmbedder::new(&[
        ("brain", vec![1.0, 0.0, 0.0]),
        ("freeze", vec![0.0, 1.0, 0.0]),
        ("chill", vec![0.0, 0.8, 0.6]),
        ("ice", vec![0.0, 0.6, 0.8]),
        ("mind", vec![0.6, 0.0, 0.8]),
        ("hot", vec![0.0, 0.0, 1.0]),
        ("dog", vec![1.0, 1.0, 0.0]),
    ])
}

fn scorer_with(provider: Arc<dyn EmbeddingProvider>) -> SimilarityScorer {
    SimilarityScorer::new(Some(provider), EmbeddingCache::new())
}

fn assert_invariants(result: &picktle::similarity::models::SimilarityResult) {
    assert!((0.0..=100.0).contains(&result.similarity));
    assert!((1..=1000).contains(&result.rank));
    let expected = (((1.0 - result.similarity / 100.0) * 1000.0).floor() + 1.0).min(1000.0) as u32;
    assert_eq!(result.rank, expected);
    for w in &result.word_similarities {
        assert!((0.0..=100.0).contains(&w.similarity), "{w:?}");
    }
}

// ============================================================
// Exact matches and degenerate input
// ============================================================

#[tokio::test]
async fn hot_dog_exact_match_is_perfect() {
    let provider = Arc::new(vocabulary());
    let scorer = scorer_with(provider.clone());

    let r = scorer
        .calculate_word_similarity(&["hot", "dog"], &["hot", "dog"])
        .await
        .unwrap();

    assert_eq!(r.similarity, 100.0);
    assert_eq!(r.rank, 1);
    assert_eq!(r.word_similarities.len(), 2);
    assert!(r.word_similarities.iter().all(|w| w.similarity == 100.0));
    assert_eq!(r.path, ScoringPath::ExactMatch);
    assert_eq!(provider.calls(), 0, "exact match must not call the provider");
}

#[tokio::test]
async fn exact_match_ignores_case_and_maps_positionally() {
    let scorer = SimilarityScorer::without_provider(EmbeddingCache::new());
    let r = scorer
        .calculate_word_similarity(&["Brain", "Freeze"], &["BRAIN", "freeze"])
        .await
        .unwrap();

    assert_eq!(r.similarity, 100.0);
    assert_eq!(r.word_similarities[0].word, "BRAIN");
    assert_eq!(r.word_similarities[0].target_word, "Brain");
    assert_eq!(r.word_similarities[1].target_word, "Freeze");
}

#[tokio::test]
async fn empty_targets_give_zero_result() {
    let provider = Arc::new(vocabulary());
    let scorer = scorer_with(provider.clone());
    let r = scorer
        .calculate_word_similarity(&["", "  "], &["brain"])
        .await
        .unwrap();
    assert_eq!(r.similarity, 0.0);
    assert_eq!(r.rank, 1000);
    assert!(r.word_similarities.is_empty());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn empty_guesses_give_zero_result() {
    let scorer = scorer_with(Arc::new(vocabulary()));
    let empty: [&str; 0] = [];
    let r = scorer
        .calculate_word_similarity(&["brain"], &empty)
        .await
        .unwrap();
    assert!(r.word_similarities.is_empty());
    assert_eq!(r.path, ScoringPath::Empty);
}

#[tokio::test]
async fn blank_guess_entries_are_filtered() {
    let scorer = scorer_with(Arc::new(vocabulary()));
    let r = scorer
        .calculate_word_similarity(&["brain", "freeze"], &["brain", " ", "", "chill"])
        .await
        .unwrap();
    assert_eq!(r.word_similarities.len(), 2);
}

// ============================================================
// Embedding path
// ============================================================

#[tokio::test]
async fn embedding_path_picks_closest_target() {
    let provider = Arc::new(vocabulary());
    let scorer = scorer_with(provider.clone());

    let r = scorer
        .calculate_word_similarity(&["brain", "freeze"], &["brain", "chill"])
        .await
        .unwrap();

    assert_eq!(r.path, ScoringPath::Embedding);
    assert_eq!(r.word_similarities.len(), 2);

    assert_eq!(r.word_similarities[0].similarity, 100.0);
    assert_eq!(r.word_similarities[0].target_word, "brain");

    // chill . freeze = 0.8 -> 80%, chill . brain = 0
    assert_eq!(r.word_similarities[1].target_word, "freeze");
    assert_eq!(r.word_similarities[1].similarity, 80.0);

    assert_eq!(r.similarity, 90.0);
    assert_eq!(proximity_label(r.similarity), "hot");
    assert_invariants(&r);
}

#[tokio::test]
async fn exact_matched_words_are_not_embedded() {
    let provider = Arc::new(vocabulary());
    let scorer = scorer_with(provider.clone());

    scorer
        .calculate_word_similarity(&["brain", "freeze"], &["brain", "chill"])
        .await
        .unwrap();

    // Two targets plus "chill"; "brain" as a guess reuses the target lookup.
    assert_eq!(provider.calls(), 3);
    assert!(scorer.cache().contains("chill"));
    assert_eq!(scorer.cache().len(), 3);
}

#[tokio::test]
async fn orthogonal_guess_scores_zero_against_first_target() {
    let scorer = scorer_with(Arc::new(vocabulary()));
    let r = scorer
        .calculate_word_similarity(&["brain", "freeze"], &["hot"])
        .await
        .unwrap();
    assert_eq!(r.word_similarities[0].similarity, 0.0);
    assert_eq!(r.word_similarities[0].target_word, "brain");
    assert_eq!(r.rank, 1000);
}

#[tokio::test]
async fn per_word_similarity_has_two_decimals() {
    let scorer = scorer_with(Arc::new(vocabulary()));
    let r = scorer
        .calculate_word_similarity(&["dog"], &["brain"])
        .await
        .unwrap();
    // cos 45 degrees = 70.7106...
    assert_eq!(r.word_similarities[0].similarity, 70.71);
    assert_invariants(&r);
}

#[tokio::test]
async fn repeated_guess_hits_cache() {
    let provider = Arc::new(vocabulary());
    let scorer = scorer_with(provider.clone());

    scorer
        .calculate_word_similarity(&["freeze"], &["ice"])
        .await
        .unwrap();
    let after_first = provider.calls();
    assert_eq!(after_first, 2);

    let r = scorer
        .calculate_word_similarity(&["freeze"], &["ice"])
        .await
        .unwrap();
    assert_eq!(provider.calls(), after_first, "second call must be served from cache");
    assert_eq!(r.word_similarities[0].similarity, 60.0);
}

#[tokio::test]
async fn shared_cache_serves_other_scorers() {
    let cache = EmbeddingCache::new();
    let first = Arc::new(vocabulary());
    let second = Arc::new(vocabulary());

    SimilarityScorer::new(Some(first.clone()), cache.clone())
        .calculate_word_similarity(&["brain"], &["mind"])
        .await
        .unwrap();
    SimilarityScorer::new(Some(second.clone()), cache.clone())
        .calculate_word_similarity(&["brain"], &["mind"])
        .await
        .unwrap();

    assert_eq!(first.calls(), 2);
    assert_eq!(second.calls(), 0);
}

#[tokio::test]
async fn cache_keys_are_trimmed_input() {
    let provider = Arc::new(vocabulary());
    let scorer = scorer_with(provider.clone());
    scorer
        .calculate_word_similarity(&[" brain "], &["  mind"])
        .await
        .unwrap();
    assert!(scorer.cache().contains("brain"));
    assert!(scorer.cache().contains("mind"));
}

// ============================================================
// Fallback
// ============================================================

#[tokio::test]
async fn unreachable_provider_falls_back_for_whole_request() {
    let provider = Arc::new(UnreachableEmbedder {
        calls: AtomicUsize::new(0),
    });
    let scorer = scorer_with(provider.clone());

    let r = scorer
        .calculate_word_similarity(&["brain", "freeze"], &["brain", "chill"])
        .await
        .expect("provider failure must not reach the caller");

    assert_eq!(r.path, ScoringPath::Fallback);
    assert_eq!(r.word_similarities.len(), 2);
    assert_eq!(r.word_similarities[0].similarity, 100.0);
    assert_eq!(r.word_similarities[0].target_word, "brain");
    assert!((0.0..60.0).contains(&r.word_similarities[1].similarity));
    assert!(provider.calls() > 0);
    assert!(scorer.cache().is_empty());
    assert_invariants(&r);
}

#[tokio::test]
async fn partial_provider_failure_falls_back_for_whole_request() {
    // "cat" has no vector, so one lookup fails while the others succeed.
    let scorer = scorer_with(Arc::new(vocabulary()));
    let r = scorer
        .calculate_word_similarity(&["brain", "freeze"], &["chill", "cat"])
        .await
        .unwrap();

    assert_eq!(r.path, ScoringPath::Fallback);
    assert_eq!(r.word_similarities.len(), 2);
    for w in &r.word_similarities {
        assert!((0.0..60.0).contains(&w.similarity));
    }
}

#[tokio::test]
async fn no_provider_access_uses_fallback() {
    let scorer = SimilarityScorer::without_provider(EmbeddingCache::new());
    assert!(!scorer.has_provider_access());

    let r = scorer
        .calculate_word_similarity(&["brain", "freeze"], &["ice", "cream", "freeze"])
        .await
        .unwrap();

    assert!(r.is_fallback());
    assert_eq!(r.word_similarities.len(), 3);
    assert_eq!(r.word_similarities[2].similarity, 100.0);
    assert_invariants(&r);
}

// ============================================================
// Contract violations
// ============================================================

#[tokio::test]
async fn dimension_mismatch_is_an_error() {
    let provider = Arc::new(FixedEmbedder::new(&[
        ("brain", vec![1.0, 0.0, 0.0]),
        ("chill", vec![1.0, 0.0]),
    ]));
    let scorer = scorer_with(provider);

    let err = scorer
        .calculate_word_similarity(&["brain"], &["chill"])
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("dimension mismatch"));
}

// ============================================================
// Single-text embedding lookup
// ============================================================

#[tokio::test]
async fn get_embedding_caches_provider_result() {
    let provider = Arc::new(vocabulary());
    let scorer = scorer_with(provider.clone());

    let a = scorer.get_embedding("brain").await;
    let b = scorer.get_embedding(" brain ").await;
    assert_eq!(a.as_slice(), &[1.0, 0.0, 0.0]);
    assert_eq!(a, b);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn get_embedding_masks_failure_with_unit_vector() {
    let provider = Arc::new(UnreachableEmbedder {
        calls: AtomicUsize::new(0),
    });
    let scorer = scorer_with(provider);

    let v = scorer.get_embedding("brain").await;
    assert_eq!(v.len(), 3);
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    assert!((norm - 1.0).abs() < 1e-9);
    assert!(!scorer.cache().contains("brain"));
}

#[tokio::test]
async fn get_embedding_blank_is_zero_vector_without_calls() {
    let provider = Arc::new(vocabulary());
    let scorer = scorer_with(provider.clone());
    let v = scorer.get_embedding("  ").await;
    assert_eq!(v.as_slice(), &[0.0, 0.0, 0.0]);
    assert_eq!(provider.calls(), 0);
}
