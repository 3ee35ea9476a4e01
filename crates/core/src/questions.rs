//! The fixed question catalogue for the workshop pre-survey.
//!
//! Three thematic sections, seven questions. Option labels are persisted
//! verbatim into the worksheet, so changing any label here changes what new
//! rows contain.

use serde::Serialize;

/// Lowest selectable Q1 score.
pub const SCORE_MIN: u8 = 1;
/// Highest selectable Q1 score.
pub const SCORE_MAX: u8 = 10;
/// Q1 slider position before the respondent touches it.
pub const SCORE_DEFAULT: u8 = 5;

pub const Q2_PROBLEM_OPTIONS: [&str; 6] = [
    "Work requests are unclear (missing background or deadlines)",
    "I rarely get feedback (or it comes too late)",
    "There are too many meetings and they are inefficient",
    "Collaboration with other departments (teams) is not smooth",
    "Important information is not shared in time (I'm the last to know)",
    "It is hard to speak honestly (lack of psychological safety)",
];

pub const Q3_REASON_OPTIONS: [&str; 6] = [
    "My opinion would probably be ignored",
    "Nothing changes even when I speak up",
    "The leader (manager) might feel uncomfortable",
    "I might be penalized for disagreeing",
    "I don't know enough (lack of information)",
    "not applicable / can speak freely",
];

/// Index into [`Q3_REASON_OPTIONS`] selected when the form first renders.
pub const Q3_DEFAULT_INDEX: usize = 5;

pub const Q4_TOPIC_OPTIONS: [&str; 5] = [
    "Fixing inefficient meetings (length, format, etc.)",
    "Clear reporting and fast feedback (vertical communication)",
    "Smooth collaboration requests and responses (horizontal communication)",
    "Unclear scope of work (R&R)",
    "A culture of exchanging honest opinions (psychological safety)",
];

/// The widget a question is rendered with, and therefore the shape of the
/// value it produces.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    Scale {
        min: u8,
        max: u8,
        default: u8,
    },
    MultiSelect {
        options: &'static [&'static str],
    },
    SingleSelect {
        options: &'static [&'static str],
        default_index: usize,
    },
    ShortText {
        placeholder: &'static str,
    },
    LongText {
        placeholder: &'static str,
    },
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    /// Form field name; also the record column the answer lands in.
    pub field: &'static str,
    pub prompt: &'static str,
    pub help: Option<&'static str>,
    pub widget: Widget,
    /// Field name of the free-text supplement, if the question has one.
    pub other_field: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub questions: &'static [Question],
}

/// Placeholder shown in every free-text supplement box.
pub const OTHER_PLACEHOLDER: &str = "Enter any other comments here.";

static SECTIONS: [Section; 3] = [
    Section {
        title: "1. Diagnosing how we communicate today",
        questions: &[
            Question {
                field: "q1_score",
                prompt: "Q1. How would you score the overall communication in our organization (or team) today?",
                help: Some("(1: very dissatisfied ~ 10: very satisfied)"),
                widget: Widget::Scale {
                    min: SCORE_MIN,
                    max: SCORE_MAX,
                    default: SCORE_DEFAULT,
                },
                other_field: None,
            },
            Question {
                field: "q2_problems",
                prompt: "Q2. What frustrates you most about the way we communicate now? (select all that apply)",
                help: None,
                widget: Widget::MultiSelect {
                    options: &Q2_PROBLEM_OPTIONS,
                },
                other_field: Some("q2_other"),
            },
            Question {
                field: "q3_reason",
                prompt: "Q3. If you find it hard to speak honestly, what is the biggest reason?",
                help: None,
                widget: Widget::SingleSelect {
                    options: &Q3_REASON_OPTIONS,
                    default_index: Q3_DEFAULT_INDEX,
                },
                other_field: Some("q3_other"),
            },
        ],
    },
    Section {
        title: "2. Workshop topics and real cases",
        questions: &[
            Question {
                field: "q4_topics",
                prompt: "Q4. Which topics should this workshop focus on most? (select all that apply)",
                help: None,
                widget: Widget::MultiSelect {
                    options: &Q4_TOPIC_OPTIONS,
                },
                other_field: Some("q4_other"),
            },
            Question {
                field: "q5_case_text",
                prompt: "Q5. Describe a concrete situation (a conflict case) you would like us to role-play.",
                help: None,
                widget: Widget::LongText {
                    placeholder: "e.g. I asked team A for material and got no answer for 3 days / my lead asked me to rewrite the report right before the meeting...",
                },
                other_field: None,
            },
            Question {
                field: "q6_habit_text",
                prompt: "Q6. Name one 'worst communication habit' our organization must fix.",
                help: None,
                widget: Widget::ShortText {
                    placeholder: "e.g. talking in chat without an @mention / nobody speaking up in meetings...",
                },
                other_field: None,
            },
        ],
    },
    Section {
        title: "3. What you expect from the workshop",
        questions: &[Question {
            field: "q7_expectation_text",
            prompt: "Q7. If we write our own code of conduct, what must it include?",
            help: None,
            widget: Widget::ShortText {
                placeholder: "e.g. Meetings end within 30 minutes / every request gets a reply within 24 hours...",
            },
            other_field: None,
        }],
    },
];

/// The full question set, in display order.
pub fn catalogue() -> &'static [Section] {
    &SECTIONS
}
