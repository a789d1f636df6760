//! Question bank management.

use std::future::Future;

use citizen_survey::{Category, Question, QuestionId};

use crate::AdminError;

/// A validated question text and category, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    text: String,
    category: Category,
}

impl QuestionDraft {
    /// Trims `text` and rejects it when nothing is left.
    pub fn new(text: &str, category: Category) -> Result<Self, AdminError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AdminError::EmptyQuestionText);
        }
        Ok(Self {
            text: text.to_string(),
            category,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

/// Read-write access to the whole question bank, inactive rows included.
pub trait QuestionAdmin {
    type Error: Into<anyhow::Error>;

    /// Every question in ascending id order.
    fn list_questions(&self) -> impl Future<Output = Result<Vec<Question>, Self::Error>>;

    /// Store a new question. New questions are active.
    fn create_question(
        &self,
        draft: QuestionDraft,
    ) -> impl Future<Output = Result<Question, Self::Error>>;

    /// Replace the text and category of an existing question.
    fn update_question(
        &self,
        id: QuestionId,
        draft: QuestionDraft,
    ) -> impl Future<Output = Result<Question, Self::Error>>;

    fn set_question_active(
        &self,
        id: QuestionId,
        active: bool,
    ) -> impl Future<Output = Result<Question, Self::Error>>;

    /// Delete a question. What happens to its answers is up to the store.
    fn delete_question(&self, id: QuestionId) -> impl Future<Output = Result<(), Self::Error>>;
}
