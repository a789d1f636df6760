use std::future::Future;

use crate::{AnswerRecord, NewRespondent, Question, Respondent};

/// Read access to the question bank.
///
/// Implementations talk to whatever row store backs the deployment. The
/// wizard only ever calls this once, when it is created.
pub trait QuestionStore {
    /// The error type for this store.
    type Error: Into<anyhow::Error>;

    /// List the active questions in ascending id order.
    fn list_active_questions(&self) -> impl Future<Output = Result<Vec<Question>, Self::Error>>;
}

/// Append-only access to submitted respondents.
pub trait RespondentStore {
    /// The error type for this store.
    type Error: Into<anyhow::Error>;

    /// Insert one respondent row and return it with its generated id and
    /// creation timestamp.
    fn create_respondent(
        &self,
        respondent: NewRespondent,
    ) -> impl Future<Output = Result<Respondent, Self::Error>>;
}

/// Append-only access to per-question scores.
pub trait AnswerStore {
    /// The error type for this store.
    type Error: Into<anyhow::Error>;

    /// Insert a batch of answer rows in a single operation.
    ///
    /// The wizard treats the batch as all-or-nothing: any error means no row
    /// of the batch is assumed to be stored.
    fn create_answers(
        &self,
        answers: Vec<AnswerRecord>,
    ) -> impl Future<Output = Result<(), Self::Error>>;
}
