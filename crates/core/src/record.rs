//! The persisted survey record and its row layout.
//!
//! A [`SurveyRecord`] is the frozen form of one submission. Column order is an
//! external contract with the worksheet's header row and must not change
//! without changing the sheet.

use serde::Serialize;

use crate::answers::SurveyAnswers;
use crate::types::{CellValue, Timestamp};

/// `strftime` format of the `submitted_at` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One submission, serialized into the 11 worksheet columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyRecord {
    submitted_at: String,
    q1_score: u8,
    q2_problems: String,
    q2_other: String,
    q3_reason: String,
    q3_other: String,
    q4_topics: String,
    q4_other: String,
    q5_case_text: String,
    q6_habit_text: String,
    q7_expectation_text: String,
}

impl SurveyRecord {
    /// Worksheet column names, in row order.
    pub const COLUMNS: [&'static str; 11] = [
        "submitted_at",
        "q1_score",
        "q2_problems",
        "q2_other",
        "q3_reason",
        "q3_other",
        "q4_topics",
        "q4_other",
        "q5_case_text",
        "q6_habit_text",
        "q7_expectation_text",
    ];

    /// Freeze `answers` into a record stamped with `submitted_at`.
    pub fn assemble(answers: &SurveyAnswers, submitted_at: Timestamp) -> Self {
        Self {
            submitted_at: submitted_at.format(TIMESTAMP_FORMAT).to_string(),
            q1_score: answers.q1_score.get(),
            q2_problems: answers.q2_problems.to_list_literal(),
            q2_other: answers.q2_other.clone(),
            q3_reason: answers.q3_reason.label().to_string(),
            q3_other: answers.q3_other.clone(),
            q4_topics: answers.q4_topics.to_list_literal(),
            q4_other: answers.q4_other.clone(),
            q5_case_text: answers.q5_case_text.clone(),
            q6_habit_text: answers.q6_habit_text.clone(),
            q7_expectation_text: answers.q7_expectation_text.clone(),
        }
    }

    /// The record as worksheet cells, in [`Self::COLUMNS`] order. The score
    /// is numeric; everything else is text.
    pub fn to_row(&self) -> Vec<CellValue> {
        vec![
            CellValue::from(self.submitted_at.as_str()),
            CellValue::from(self.q1_score),
            CellValue::from(self.q2_problems.as_str()),
            CellValue::from(self.q2_other.as_str()),
            CellValue::from(self.q3_reason.as_str()),
            CellValue::from(self.q3_other.as_str()),
            CellValue::from(self.q4_topics.as_str()),
            CellValue::from(self.q4_other.as_str()),
            CellValue::from(self.q5_case_text.as_str()),
            CellValue::from(self.q6_habit_text.as_str()),
            CellValue::from(self.q7_expectation_text.as_str()),
        ]
    }

    pub fn submitted_at(&self) -> &str {
        &self.submitted_at
    }

    pub fn q1_score(&self) -> u8 {
        self.q1_score
    }

    pub fn q2_problems(&self) -> &str {
        &self.q2_problems
    }

    pub fn q3_reason(&self) -> &str {
        &self.q3_reason
    }

    pub fn q4_topics(&self) -> &str {
        &self.q4_topics
    }

    pub fn q5_case_text(&self) -> &str {
        &self.q5_case_text
    }

    pub fn q6_habit_text(&self) -> &str {
        &self.q6_habit_text
    }

    pub fn q7_expectation_text(&self) -> &str {
        &self.q7_expectation_text
    }
}
