//! Single-choice quiz builder
//!
//! `? ` opens a question, `* ` adds the correct answer, `- ` adds a wrong one.
//! The runtime treats the first answer as the correct one, so `*` answers
//! are prepended and `-` answers appended. Several `*` lines are accepted
//! without complaint; whichever ends up first is what the runtime grades.

use super::{BlockBuilder, BuildContext};
use crate::types::{
    ContentMetadata, ContentObject, ContentParams, ContentType, FeedbackRange, LibraryId,
    SingleChoice, SingleChoiceBehaviour, SingleChoiceSetParams,
};
use std::collections::VecDeque;
use uuid::Uuid;

/// One parsed question; `answers[0]` is the correct one
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub text: String,
    pub answers: Vec<String>,
}

pub struct QuizBuilder;

impl BlockBuilder for QuizBuilder {
    fn content_type(&self) -> ContentType {
        ContentType::SingleChoiceSet
    }

    fn build_with(
        &self,
        library: LibraryId,
        lines: &[String],
        _ctx: &BuildContext<'_>,
    ) -> ContentObject {
        let choices = parse_questions(lines)
            .into_iter()
            .map(|q| SingleChoice {
                sub_content_id: Uuid::new_v4(),
                question: q.text,
                answers: q.answers,
            })
            .collect();

        ContentObject::new(
            library,
            ContentParams::SingleChoiceSet(SingleChoiceSetParams {
                choices,
                behaviour: SingleChoiceBehaviour::default(),
                overall_feedback: vec![FeedbackRange { from: 0, to: 100 }],
            }),
            ContentMetadata::new("Quiz", ContentType::SingleChoiceSet),
        )
    }
}

/// Parse question and answer lines. Answer lines before any question are ignored.
pub fn parse_questions(lines: &[String]) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut current: Option<(String, VecDeque<String>)> = None;

    for line in lines {
        let line = line.trim();

        if let Some(text) = line.strip_prefix('?') {
            if let Some((text, answers)) = current.take() {
                questions.push(Question {
                    text,
                    answers: answers.into(),
                });
            }
            current = Some((text.trim().to_string(), VecDeque::new()));
        } else if let Some(answer) = line.strip_prefix('*') {
            if let Some((_, answers)) = current.as_mut() {
                answers.push_front(answer.trim().to_string());
            }
        } else if let Some(answer) = line.strip_prefix('-') {
            if let Some((_, answers)) = current.as_mut() {
                answers.push_back(answer.trim().to_string());
            }
        }
    }

    if let Some((text, answers)) = current {
        questions.push(Question {
            text,
            answers: answers.into(),
        });
    }

    questions
}
