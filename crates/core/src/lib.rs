//! Domain model for the workshop pre-survey: the question catalogue, the
//! respondent's answers, and the fixed-width record appended per submission.

pub mod answers;
pub mod error;
pub mod questions;
pub mod record;
pub mod submission;
pub mod types;
