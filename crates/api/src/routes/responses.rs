use axum::routing::{get, post};
use axum::Router;

use crate::handlers::responses;
use crate::state::AppState;

/// JSON routes, nested under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(responses::list_questions))
        .route("/responses", post(responses::create_response))
}
