//! Respondent answers: the request-scoped state of one form.
//!
//! [`SurveyInput`] is the loosely typed shape that arrives over HTTP (an
//! url-encoded form or a JSON body). [`SurveyInput::into_answers`] narrows it
//! to [`SurveyAnswers`], whose field types can only hold values the form's
//! widgets could have produced.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::questions::{
    Q2_PROBLEM_OPTIONS, Q3_DEFAULT_INDEX, Q3_REASON_OPTIONS, Q4_TOPIC_OPTIONS, SCORE_DEFAULT,
    SCORE_MAX, SCORE_MIN,
};

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

/// A Q1 score, always within `SCORE_MIN..=SCORE_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub fn new(value: i64) -> Result<Self, CoreError> {
        if (i64::from(SCORE_MIN)..=i64::from(SCORE_MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CoreError::invalid(
                "q1_score",
                format!("must be between {SCORE_MIN} and {SCORE_MAX}, got {value}"),
            ))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self(SCORE_DEFAULT)
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The options ticked in a multi-select question.
///
/// Always ordered by the options' declared position and free of duplicates,
/// regardless of the order the labels were submitted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection(Vec<&'static str>);

impl Selection {
    /// Build a selection from submitted labels, checked against `options`.
    pub fn from_labels<S: AsRef<str>>(
        field: &'static str,
        options: &'static [&'static str],
        labels: &[S],
    ) -> Result<Self, CoreError> {
        let mut picked = vec![false; options.len()];
        for label in labels {
            let label = label.as_ref();
            let pos = options
                .iter()
                .position(|o| *o == label)
                .ok_or_else(|| CoreError::invalid(field, format!("unknown option '{label}'")))?;
            picked[pos] = true;
        }

        Ok(Self(
            options
                .iter()
                .zip(picked)
                .filter_map(|(option, on)| on.then_some(*option))
                .collect(),
        ))
    }

    pub fn labels(&self) -> &[&'static str] {
        &self.0
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| *l == label)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Textual list form stored in the worksheet cell: `['a', 'b']`, or `[]`
    /// when nothing is selected.
    ///
    /// Each label is quoted with single quotes unless it contains one and no
    /// double quote, in which case double quotes are used. This keeps rows
    /// consistent with those already in the sheet.
    pub fn to_list_literal(&self) -> String {
        let items: Vec<String> = self.0.iter().map(|l| quote_label(l)).collect();
        format!("[{}]", items.join(", "))
    }
}

fn quote_label(label: &str) -> String {
    let quote = if label.contains('\'') && !label.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(label.len() + 2);
    out.push(quote);
    for c in label.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

// ---------------------------------------------------------------------------
// Reason (Q3)
// ---------------------------------------------------------------------------

/// The single Q3 choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Reason(&'static str);

impl Reason {
    pub fn from_label(label: &str) -> Result<Self, CoreError> {
        Q3_REASON_OPTIONS
            .iter()
            .find(|o| **o == label)
            .map(|o| Self(*o))
            .ok_or_else(|| CoreError::invalid("q3_reason", format!("unknown option '{label}'")))
    }

    pub fn label(self) -> &'static str {
        self.0
    }
}

impl Default for Reason {
    fn default() -> Self {
        Self(Q3_REASON_OPTIONS[Q3_DEFAULT_INDEX])
    }
}

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

/// One respondent's answers. `Default` is the form as first rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SurveyAnswers {
    pub q1_score: Score,
    pub q2_problems: Selection,
    pub q2_other: String,
    pub q3_reason: Reason,
    pub q3_other: String,
    pub q4_topics: Selection,
    pub q4_other: String,
    pub q5_case_text: String,
    pub q6_habit_text: String,
    pub q7_expectation_text: String,
}

impl SurveyAnswers {
    /// Current value of a free-text field, looked up by form field name.
    pub fn text(&self, field: &str) -> Option<&str> {
        let value = match field {
            "q2_other" => &self.q2_other,
            "q3_other" => &self.q3_other,
            "q4_other" => &self.q4_other,
            "q5_case_text" => &self.q5_case_text,
            "q6_habit_text" => &self.q6_habit_text,
            "q7_expectation_text" => &self.q7_expectation_text,
            _ => return None,
        };
        Some(value)
    }

    /// Current selection of a multi-select field, looked up by form field name.
    pub fn selection(&self, field: &str) -> Option<&Selection> {
        match field {
            "q2_problems" => Some(&self.q2_problems),
            "q4_topics" => Some(&self.q4_topics),
            _ => None,
        }
    }
}

/// Raw submitted values, before they are checked against the catalogue.
///
/// Every field is optional; a missing field takes the widget's default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SurveyInput {
    pub q1_score: Option<i64>,
    pub q2_problems: Vec<String>,
    pub q2_other: String,
    pub q3_reason: Option<String>,
    pub q3_other: String,
    pub q4_topics: Vec<String>,
    pub q4_other: String,
    pub q5_case_text: String,
    pub q6_habit_text: String,
    pub q7_expectation_text: String,
}

impl SurveyInput {
    /// Collect url-encoded form pairs. Multi-select fields arrive as one pair
    /// per ticked box; unknown keys (such as the submit button) are ignored.
    pub fn from_form_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, CoreError>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut input = Self::default();

        for (key, value) in pairs {
            let value: String = value.into();
            match key.as_ref() {
                "q1_score" => {
                    let parsed = value.trim().parse::<i64>().map_err(|_| {
                        CoreError::invalid("q1_score", format!("not an integer: '{value}'"))
                    })?;
                    input.q1_score = Some(parsed);
                }
                "q2_problems" => input.q2_problems.push(value),
                "q2_other" => input.q2_other = value,
                "q3_reason" => input.q3_reason = Some(value),
                "q3_other" => input.q3_other = value,
                "q4_topics" => input.q4_topics.push(value),
                "q4_other" => input.q4_other = value,
                "q5_case_text" => input.q5_case_text = value,
                "q6_habit_text" => input.q6_habit_text = value,
                "q7_expectation_text" => input.q7_expectation_text = value,
                _ => {}
            }
        }

        Ok(input)
    }

    pub fn into_answers(self) -> Result<SurveyAnswers, CoreError> {
        let q1_score = match self.q1_score {
            Some(n) => Score::new(n)?,
            None => Score::default(),
        };
        let q3_reason = match self.q3_reason.as_deref() {
            Some(label) => Reason::from_label(label)?,
            None => Reason::default(),
        };

        Ok(SurveyAnswers {
            q1_score,
            q2_problems: Selection::from_labels(
                "q2_problems",
                &Q2_PROBLEM_OPTIONS,
                &self.q2_problems,
            )?,
            q2_other: self.q2_other,
            q3_reason,
            q3_other: self.q3_other,
            q4_topics: Selection::from_labels("q4_topics", &Q4_TOPIC_OPTIONS, &self.q4_topics)?,
            q4_other: self.q4_other,
            q5_case_text: self.q5_case_text,
            q6_habit_text: self.q6_habit_text,
            q7_expectation_text: self.q7_expectation_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn score_bounds() {
        assert_eq!(Score::new(1).unwrap().get(), 1);
        assert_eq!(Score::new(10).unwrap().get(), 10);
        assert_matches!(
            Score::new(0),
            Err(CoreError::InvalidInput { field: "q1_score", .. })
        );
        assert_matches!(Score::new(11), Err(CoreError::InvalidInput { .. }));
        assert_eq!(Score::default().get(), 5);
    }

    #[test]
    fn selection_follows_declared_order_and_drops_duplicates() {
        let picked = Selection::from_labels(
            "q2_problems",
            &Q2_PROBLEM_OPTIONS,
            &[
                Q2_PROBLEM_OPTIONS[2],
                Q2_PROBLEM_OPTIONS[0],
                Q2_PROBLEM_OPTIONS[2],
            ],
        )
        .unwrap();

        assert_eq!(
            picked.labels(),
            &[Q2_PROBLEM_OPTIONS[0], Q2_PROBLEM_OPTIONS[2]]
        );
    }

    #[test]
    fn selection_rejects_unknown_label() {
        let result = Selection::from_labels("q4_topics", &Q4_TOPIC_OPTIONS, &["Karaoke night"]);
        assert_matches!(
            result,
            Err(CoreError::InvalidInput { field: "q4_topics", .. })
        );
    }

    #[test]
    fn empty_selection_is_an_empty_list() {
        assert_eq!(Selection::default().to_list_literal(), "[]");
    }

    #[test]
    fn list_literal_quotes_each_label() {
        let picked = Selection::from_labels(
            "q4_topics",
            &Q4_TOPIC_OPTIONS,
            &[Q4_TOPIC_OPTIONS[0], Q4_TOPIC_OPTIONS[3]],
        )
        .unwrap();
        assert_eq!(
            picked.to_list_literal(),
            "['Fixing inefficient meetings (length, format, etc.)', 'Unclear scope of work (R&R)']"
        );
    }

    #[test]
    fn label_with_apostrophe_uses_double_quotes() {
        assert_eq!(quote_label("I'm late"), "\"I'm late\"");
        assert_eq!(quote_label("say \"hi\" it's"), "'say \"hi\" it\\'s'");
    }

    #[test]
    fn form_pairs_collect_repeated_keys() {
        let input = SurveyInput::from_form_pairs([
            ("q1_score", "8"),
            ("q2_problems", Q2_PROBLEM_OPTIONS[3]),
            ("q2_problems", Q2_PROBLEM_OPTIONS[1]),
            ("q7_expectation_text", "Short meetings"),
            ("submit", ""),
        ])
        .unwrap();

        assert_eq!(input.q1_score, Some(8));
        assert_eq!(input.q2_problems.len(), 2);

        let answers = input.into_answers().unwrap();
        assert_eq!(
            answers.q2_problems.labels(),
            &[Q2_PROBLEM_OPTIONS[1], Q2_PROBLEM_OPTIONS[3]]
        );
        assert_eq!(answers.q3_reason, Reason::default());
        assert_eq!(answers.q7_expectation_text, "Short meetings");
    }

    #[test]
    fn non_numeric_score_is_rejected() {
        let result = SurveyInput::from_form_pairs([("q1_score", "eight")]);
        assert_matches!(
            result,
            Err(CoreError::InvalidInput { field: "q1_score", .. })
        );
    }

    #[test]
    fn empty_input_yields_defaults() {
        let answers = SurveyInput::default().into_answers().unwrap();
        assert_eq!(answers, SurveyAnswers::default());
        assert_eq!(answers.q3_reason.label(), "not applicable / can speak freely");
    }

    #[test]
    fn field_lookup_by_name() {
        let answers = SurveyAnswers {
            q6_habit_text: "Late replies".into(),
            ..Default::default()
        };
        assert_eq!(answers.text("q6_habit_text"), Some("Late replies"));
        assert_eq!(answers.text("q2_other"), Some(""));
        assert_eq!(answers.text("q1_score"), None);
        assert!(answers.selection("q4_topics").is_some_and(Selection::is_empty));
        assert!(answers.selection("q3_reason").is_none());
    }

    #[test]
    fn unknown_reason_is_rejected() {
        let input = SurveyInput {
            q3_reason: Some("Because".into()),
            ..Default::default()
        };
        assert_matches!(
            input.into_answers(),
            Err(CoreError::InvalidInput { field: "q3_reason", .. })
        );
    }
}
