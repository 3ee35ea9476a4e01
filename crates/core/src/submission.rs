//! Submitting answers: assemble a record and append it as one row.

use async_trait::async_trait;

use crate::answers::SurveyAnswers;
use crate::error::CoreError;
use crate::record::SurveyRecord;
use crate::types::{CellValue, Timestamp};

/// Destination for survey rows: one append-only worksheet.
///
/// Implementations report failures as [`CoreError::Append`] carrying the
/// underlying error text; callers surface that text to the respondent.
#[async_trait]
pub trait RowAppender: Send + Sync {
    async fn append_row(&self, row: &[CellValue]) -> Result<(), CoreError>;
}

/// Assemble the record for `answers` at `submitted_at` and append it.
///
/// Each call writes a new row; there is no deduplication and no retry. On
/// failure the record is dropped and the caller still owns `answers`.
pub async fn submit(
    appender: &dyn RowAppender,
    answers: &SurveyAnswers,
    submitted_at: Timestamp,
) -> Result<SurveyRecord, CoreError> {
    let record = SurveyRecord::assemble(answers, submitted_at);
    appender.append_row(&record.to_row()).await?;
    Ok(record)
}
