// POST /api/proximity: hot/cold band and accent for a similarity value.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::similarity::proximity::Proximity;
use crate::web::api_error;

#[derive(Deserialize)]
pub struct ProximityRequest {
    pub similarity: f64,
}

pub async fn proximity(
    payload: Result<Json<ProximityRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(e) => {
            return api_error(StatusCode::BAD_REQUEST, &e.body_text());
        }
    };

    let proximity = Proximity::from_similarity(request.similarity);
    Json(serde_json::json!({
        "label": proximity.as_str(),
        "color": proximity.color(),
    }))
    .into_response()
}
