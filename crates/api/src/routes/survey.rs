use axum::routing::get;
use axum::Router;

use crate::handlers::survey;
use crate::state::AppState;

/// The HTML survey page, mounted at the site root.
///
/// ```text
/// GET  /      render the empty form
/// POST /      submit the form
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(survey::show_form).post(survey::submit_form))
}
