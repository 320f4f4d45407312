// POST /api/word-similarity: score a guess against the round's target words.
//
// Accepts either explicit guess words or a free-text guess:
//   { "targetWords": ["brain", "freeze"], "guessWords": ["brain", "chill"] }
//   { "targetWords": ["brain", "freeze"], "guess": "Brain chill" }
//
// Shape problems (non-array fields, non-string entries) are 400s and never
// reach the scorer. Missing fields and nothing left to score return the
// zero payload with rank "Very Low". Provider trouble is invisible here: the
// scorer answers with fallback scores instead.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::similarity::models::WordSimilarity;
use crate::similarity::rank::ZERO_RANK_LABEL;
use crate::similarity::{filter_blank, split_guess};
use crate::web::{api_error, AppState};

/// Rank as sent to clients: a position, or a label when nothing was scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RankValue {
    Position(u32),
    Label(&'static str),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResponse {
    pub similarity: f64,
    pub rank: RankValue,
    pub word_similarities: Vec<WordSimilarity>,
}

impl SimilarityResponse {
    fn zero() -> Self {
        Self {
            similarity: 0.0,
            rank: RankValue::Label(ZERO_RANK_LABEL),
            word_similarities: Vec::new(),
        }
    }
}

/// A validated request body.
#[derive(Debug, PartialEq)]
pub struct SimilarityRequest {
    pub target_words: Vec<String>,
    pub guess_words: Vec<String>,
}

/// Validate the body shape. `guessWords` wins over `guess` when both are present.
///
/// An absent or `null` field counts as empty and ends up as the zero payload;
/// only a field of the wrong type is rejected.
pub fn parse_request(body: &Value) -> Result<SimilarityRequest, &'static str> {
    let target_words = match present(body, "targetWords") {
        None => Vec::new(),
        Some(Value::Array(items)) => {
            string_items(items).ok_or("targetWords must contain only strings")?
        }
        Some(_) => return Err("targetWords must be an array"),
    };

    let guess_words = match (present(body, "guessWords"), present(body, "guess")) {
        (Some(Value::Array(items)), _) => {
            string_items(items).ok_or("guessWords must contain only strings")?
        }
        (Some(_), _) => return Err("guessWords must be an array"),
        (None, Some(Value::String(guess))) => split_guess(guess),
        (None, Some(_)) => return Err("guess must be a string"),
        (None, None) => Vec::new(),
    };

    Ok(SimilarityRequest {
        target_words,
        guess_words,
    })
}

fn present<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !v.is_null())
}

fn string_items(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

pub async fn word_similarity(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(e) => return api_error(StatusCode::BAD_REQUEST, &e.body_text()),
    };

    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(message) => return api_error(StatusCode::BAD_REQUEST, message),
    };

    let targets = filter_blank(&request.target_words);
    let guesses = filter_blank(&request.guess_words);
    if targets.is_empty() || guesses.is_empty() {
        return Json(SimilarityResponse::zero()).into_response();
    }

    match state
        .scorer
        .calculate_word_similarity(&targets, &guesses)
        .await
    {
        Ok(result) => Json(SimilarityResponse {
            similarity: result.similarity,
            rank: RankValue::Position(result.rank),
            word_similarities: result.word_similarities,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Word similarity scoring failed");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to calculate similarity",
            )
        }
    }
}
