//! Review of submitted feedback.

use std::future::Future;

use citizen_survey::{AnswerRecord, Respondent, RespondentId};

/// Read and delete access to submitted respondents and their answers.
pub trait FeedbackAdmin {
    type Error: Into<anyhow::Error>;

    /// Every respondent, newest first.
    fn list_respondents(&self) -> impl Future<Output = Result<Vec<Respondent>, Self::Error>>;

    /// Every stored answer row.
    fn list_answers(&self) -> impl Future<Output = Result<Vec<AnswerRecord>, Self::Error>>;

    /// Delete a respondent. Stores with foreign keys delete the answers too.
    fn delete_respondent(&self, id: RespondentId)
    -> impl Future<Output = Result<(), Self::Error>>;
}
