//! Server-rendered survey page.
//!
//! The page is a single Tera template fed a view of the catalogue with the
//! current answers filled in, plus the outcome of the last submit.

use presurvey_core::answers::SurveyAnswers;
use presurvey_core::questions::{catalogue, Question, Widget, OTHER_PLACEHOLDER};
use serde::Serialize;
use tera::{Context, Tera};

const SURVEY_TEMPLATE: &str = "survey.html";

/// Browser tab title and page heading.
pub const PAGE_TITLE: &str = "Communication Workshop Pre-Survey";

/// Where the form stands after the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Unsubmitted,
    Submitted,
    Failed { message: String },
}

/// Compiled page templates.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_template(SURVEY_TEMPLATE, include_str!("../templates/survey.html"))?;
        Ok(Self { tera })
    }

    /// Render the survey form with `answers` filled in.
    pub fn render_survey(
        &self,
        answers: &SurveyAnswers,
        status: &FormStatus,
    ) -> Result<String, tera::Error> {
        let sections: Vec<SectionView> = catalogue()
            .iter()
            .map(|section| SectionView {
                title: section.title,
                questions: section
                    .questions
                    .iter()
                    .map(|q| QuestionView::new(q, answers))
                    .collect(),
            })
            .collect();

        let mut ctx = Context::new();
        ctx.insert("title", PAGE_TITLE);
        ctx.insert("sections", &sections);
        ctx.insert("submitted", &(*status == FormStatus::Submitted));
        let error = match status {
            FormStatus::Failed { message } => Some(message.as_str()),
            _ => None,
        };
        ctx.insert("error", &error);

        self.tera.render(SURVEY_TEMPLATE, &ctx)
    }
}

#[derive(Serialize)]
struct SectionView {
    title: &'static str,
    questions: Vec<QuestionView>,
}

#[derive(Serialize)]
struct QuestionView {
    field: &'static str,
    prompt: &'static str,
    help: Option<&'static str>,
    kind: &'static str,
    min: Option<u8>,
    max: Option<u8>,
    placeholder: Option<&'static str>,
    /// Scale position or text content.
    value: String,
    options: Vec<OptionView>,
    other: Option<OtherView>,
}

#[derive(Serialize)]
struct OptionView {
    label: &'static str,
    checked: bool,
}

#[derive(Serialize)]
struct OtherView {
    field: &'static str,
    placeholder: &'static str,
    value: String,
}

impl QuestionView {
    fn new(q: &Question, answers: &SurveyAnswers) -> Self {
        let text = answers.text(q.field).unwrap_or_default().to_string();

        let mut view = Self {
            field: q.field,
            prompt: q.prompt,
            help: q.help,
            kind: "",
            min: None,
            max: None,
            placeholder: None,
            value: String::new(),
            options: Vec::new(),
            other: q.other_field.map(|field| OtherView {
                field,
                placeholder: OTHER_PLACEHOLDER,
                value: answers.text(field).unwrap_or_default().to_string(),
            }),
        };

        match q.widget {
            Widget::Scale { min, max, .. } => {
                view.kind = "scale";
                view.min = Some(min);
                view.max = Some(max);
                view.value = answers.q1_score.get().to_string();
            }
            Widget::MultiSelect { options } => {
                view.kind = "multi_select";
                let selection = answers.selection(q.field);
                view.options = options
                    .iter()
                    .map(|&label| OptionView {
                        label,
                        checked: selection.is_some_and(|s| s.contains(label)),
                    })
                    .collect();
            }
            Widget::SingleSelect { options, .. } => {
                view.kind = "single_select";
                let current = answers.q3_reason.label();
                view.options = options
                    .iter()
                    .map(|&label| OptionView {
                        label,
                        checked: label == current,
                    })
                    .collect();
            }
            Widget::ShortText { placeholder } => {
                view.kind = "short_text";
                view.placeholder = Some(placeholder);
                view.value = text;
            }
            Widget::LongText { placeholder } => {
                view.kind = "long_text";
                view.placeholder = Some(placeholder);
                view.value = text;
            }
        }

        view
    }
}
