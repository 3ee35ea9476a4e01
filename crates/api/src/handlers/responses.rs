//! JSON handlers for clients that do not use the HTML form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Local;
use presurvey_core::answers::SurveyInput;
use presurvey_core::questions::{catalogue, Section};
use presurvey_core::submission;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/questions
///
/// The fixed question catalogue: sections, prompts, widgets and options.
pub async fn list_questions() -> Json<DataResponse<&'static [Section]>> {
    Json(DataResponse { data: catalogue() })
}

/// POST /api/v1/responses
///
/// Append one response. Missing fields take the form defaults. Returns 201
/// with the record exactly as written to the worksheet.
pub async fn create_response(
    State(state): State<AppState>,
    Json(input): Json<SurveyInput>,
) -> AppResult<impl IntoResponse> {
    let answers = input.into_answers()?;
    let record = submission::submit(state.appender.as_ref(), &answers, Local::now()).await?;

    tracing::info!(submitted_at = %record.submitted_at(), "Survey response recorded");

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}
