//! Handlers for the HTML survey page.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use chrono::Local;
use presurvey_core::answers::{SurveyAnswers, SurveyInput};
use presurvey_core::error::CoreError;
use presurvey_core::submission;

use crate::error::AppResult;
use crate::page::FormStatus;
use crate::state::AppState;

/// GET /
///
/// Render the form with every widget at its default.
pub async fn show_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let html = state
        .templates
        .render_survey(&SurveyAnswers::default(), &FormStatus::Unsubmitted)?;
    Ok(Html(html))
}

/// POST /
///
/// Append the submitted answers as one worksheet row. Both outcomes render the
/// page again with the answers filled in: a confirmation on success, or an
/// inline error (status 502) when the append fails, so the respondent can
/// resubmit.
pub async fn submit_form(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let answers = SurveyInput::from_form_pairs(pairs)?.into_answers()?;

    let (code, status) =
        match submission::submit(state.appender.as_ref(), &answers, Local::now()).await {
            Ok(record) => {
                tracing::info!(submitted_at = %record.submitted_at(), "Survey response recorded");
                (StatusCode::OK, FormStatus::Submitted)
            }
            Err(CoreError::Append(message)) => {
                tracing::warn!(error = %message, "Survey response not recorded");
                (StatusCode::BAD_GATEWAY, FormStatus::Failed { message })
            }
            Err(e) => return Err(e.into()),
        };

    let html = state.templates.render_survey(&answers, &status)?;
    Ok((code, Html(html)).into_response())
}
