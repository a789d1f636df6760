//! Admin access to [`MemoryStore`].

use citizen_survey::{
    AnswerRecord, MemoryStore, MemoryStoreError, Question, QuestionId, Respondent, RespondentId,
};

use crate::{FeedbackAdmin, QuestionAdmin, QuestionDraft};

impl QuestionAdmin for MemoryStore {
    type Error = MemoryStoreError;

    async fn list_questions(&self) -> Result<Vec<Question>, Self::Error> {
        Ok(self.questions())
    }

    async fn create_question(&self, draft: QuestionDraft) -> Result<Question, Self::Error> {
        Ok(self.insert_question(draft.text(), draft.category()))
    }

    async fn update_question(
        &self,
        id: QuestionId,
        draft: QuestionDraft,
    ) -> Result<Question, Self::Error> {
        self.modify_question(id, |question| {
            question.text = draft.text().to_string();
            question.category = draft.category();
        })
    }

    async fn set_question_active(
        &self,
        id: QuestionId,
        active: bool,
    ) -> Result<Question, Self::Error> {
        self.modify_question(id, |question| question.active = active)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), Self::Error> {
        self.remove_question(id)
    }
}

impl FeedbackAdmin for MemoryStore {
    type Error = MemoryStoreError;

    async fn list_respondents(&self) -> Result<Vec<Respondent>, Self::Error> {
        let mut respondents = self.respondents();
        respondents.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(respondents)
    }

    async fn list_answers(&self) -> Result<Vec<AnswerRecord>, Self::Error> {
        Ok(self.answers())
    }

    async fn delete_respondent(&self, id: RespondentId) -> Result<(), Self::Error> {
        self.remove_respondent(id)
    }
}
