pub mod health;
pub mod responses;
pub mod survey;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /questions                                       catalogue (GET)
/// /responses                                       submit answers (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(responses::router())
}
