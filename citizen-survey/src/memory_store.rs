//! In-memory store for running the wizard without a database.
//!
//! `MemoryStore` implements every store trait over plain collections. It is
//! useful for tests and demos: failures can be switched on per table, and
//! every call is counted.
//!
//! # Example
//!
//! ```rust,ignore
//! use citizen_survey::{Category, MemoryStore, Question, Wizard, WizardConfig};
//!
//! let store = MemoryStore::new()
//!     .with_question(Question::new(1, "Bagaimana kecepatan waktu pelayanan?", Category::Timeliness));
//!
//! let wizard = Wizard::start(store, WizardConfig::default()).await;
//! assert_eq!(wizard.questions().len(), 1);
//! ```

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

use chrono::Utc;
use citizen_survey_types::{
    AnswerRecord, AnswerStore, Category, NewRespondent, Question, QuestionId, QuestionStore,
    Respondent, RespondentId, RespondentStore,
};
use tokio::task::yield_now;

/// Error type for MemoryStore.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoryStoreError {
    /// An injected failure, carrying the configured message.
    #[error("{0}")]
    Rejected(String),

    #[error("question {0} does not exist")]
    UnknownQuestion(QuestionId),

    #[error("respondent {0} does not exist")]
    UnknownRespondent(RespondentId),
}

/// Number of calls made to each store operation, failed ones included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub question_fetches: usize,
    pub respondent_inserts: usize,
    pub answer_inserts: usize,
}

#[derive(Debug)]
struct Tables {
    questions: BTreeMap<QuestionId, Question>,
    respondents: Vec<Respondent>,
    answers: Vec<AnswerRecord>,
    next_question_id: i64,
    next_respondent_id: i64,
}

#[derive(Debug, Clone, Copy)]
enum Op {
    QuestionFetch,
    RespondentInsert,
    AnswerInsert,
}

#[derive(Debug, Default)]
struct Faults {
    question_fetches: Option<String>,
    respondent_writes: Option<String>,
    answer_writes: Option<String>,
}

/// A store that keeps every table in memory.
///
/// Each operation yields to the executor once before touching the tables,
/// the way a network round-trip would, so concurrent callers on the same
/// task interleave realistically.
#[derive(Debug)]
pub struct MemoryStore {
    tables: RefCell<Tables>,
    faults: RefCell<Faults>,
    calls: Cell<CallCounts>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            tables: RefCell::new(Tables {
                questions: BTreeMap::new(),
                respondents: Vec::new(),
                answers: Vec::new(),
                next_question_id: 1,
                next_respondent_id: 1,
            }),
            faults: RefCell::new(Faults::default()),
            calls: Cell::new(CallCounts::default()),
        }
    }

    /// Add a question row as-is.
    pub fn with_question(self, question: Question) -> Self {
        {
            let mut tables = self.tables.borrow_mut();
            tables.next_question_id = tables.next_question_id.max(question.id.0 + 1);
            tables.questions.insert(question.id, question);
        }
        self
    }

    /// Add several question rows.
    pub fn with_questions(self, questions: impl IntoIterator<Item = Question>) -> Self {
        questions.into_iter().fold(self, Self::with_question)
    }

    /// Add an already persisted respondent row, e.g. with a past timestamp.
    pub fn with_respondent(self, respondent: Respondent) -> Self {
        {
            let mut tables = self.tables.borrow_mut();
            tables.next_respondent_id = tables.next_respondent_id.max(respondent.id.0 + 1);
            tables.respondents.push(respondent);
        }
        self
    }

    /// Add an already persisted answer row.
    pub fn with_answer(self, answer: AnswerRecord) -> Self {
        self.tables.borrow_mut().answers.push(answer);
        self
    }

    /// Set the id the next inserted respondent receives.
    pub fn with_next_respondent_id(self, id: i64) -> Self {
        self.tables.borrow_mut().next_respondent_id = id;
        self
    }

    // === Fault injection ===

    /// Make question fetches fail with `message`, or succeed again with `None`.
    pub fn fail_question_fetches(&self, message: Option<&str>) {
        self.faults.borrow_mut().question_fetches = message.map(str::to_string);
    }

    /// Make respondent inserts fail with `message`, or succeed again with `None`.
    pub fn fail_respondent_writes(&self, message: Option<&str>) {
        self.faults.borrow_mut().respondent_writes = message.map(str::to_string);
    }

    /// Make answer inserts fail with `message`, or succeed again with `None`.
    pub fn fail_answer_writes(&self, message: Option<&str>) {
        self.faults.borrow_mut().answer_writes = message.map(str::to_string);
    }

    // === Inspection ===

    pub fn calls(&self) -> CallCounts {
        self.calls.get()
    }

    /// All questions, active or not, in ascending id order.
    pub fn questions(&self) -> Vec<Question> {
        self.tables.borrow().questions.values().cloned().collect()
    }

    /// All respondents in insertion order.
    pub fn respondents(&self) -> Vec<Respondent> {
        self.tables.borrow().respondents.clone()
    }

    /// All answer rows in insertion order.
    pub fn answers(&self) -> Vec<AnswerRecord> {
        self.tables.borrow().answers.clone()
    }

    // === Administration ===

    /// Insert a new active question with the next free id.
    pub fn insert_question(&self, text: &str, category: Category) -> Question {
        let mut tables = self.tables.borrow_mut();
        let id = QuestionId(tables.next_question_id);
        tables.next_question_id += 1;

        let question = Question::new(id, text, category);
        tables.questions.insert(id, question.clone());
        question
    }

    /// Change a question row in place and return the updated row.
    pub fn modify_question(
        &self,
        id: QuestionId,
        change: impl FnOnce(&mut Question),
    ) -> Result<Question, MemoryStoreError> {
        let mut tables = self.tables.borrow_mut();
        let question = tables
            .questions
            .get_mut(&id)
            .ok_or(MemoryStoreError::UnknownQuestion(id))?;
        change(question);
        Ok(question.clone())
    }

    /// Delete a question along with every answer that references it.
    pub fn remove_question(&self, id: QuestionId) -> Result<(), MemoryStoreError> {
        let mut tables = self.tables.borrow_mut();
        tables
            .questions
            .remove(&id)
            .ok_or(MemoryStoreError::UnknownQuestion(id))?;
        tables.answers.retain(|answer| answer.question_id != id);
        Ok(())
    }

    /// Delete a respondent along with their answers.
    pub fn remove_respondent(&self, id: RespondentId) -> Result<(), MemoryStoreError> {
        let mut tables = self.tables.borrow_mut();
        let before = tables.respondents.len();
        tables.respondents.retain(|respondent| respondent.id != id);
        if tables.respondents.len() == before {
            return Err(MemoryStoreError::UnknownRespondent(id));
        }
        tables.answers.retain(|answer| answer.respondent_id != id);
        Ok(())
    }

    fn enter(&self, op: Op) {
        let mut calls = self.calls.get();
        match op {
            Op::QuestionFetch => calls.question_fetches += 1,
            Op::RespondentInsert => calls.respondent_inserts += 1,
            Op::AnswerInsert => calls.answer_inserts += 1,
        }
        self.calls.set(calls);
    }

    fn injected(&self, op: Op) -> Result<(), MemoryStoreError> {
        let faults = self.faults.borrow();
        let message = match op {
            Op::QuestionFetch => &faults.question_fetches,
            Op::RespondentInsert => &faults.respondent_writes,
            Op::AnswerInsert => &faults.answer_writes,
        };
        match message {
            Some(message) => Err(MemoryStoreError::Rejected(message.clone())),
            None => Ok(()),
        }
    }
}

impl QuestionStore for MemoryStore {
    type Error = MemoryStoreError;

    async fn list_active_questions(&self) -> Result<Vec<Question>, Self::Error> {
        self.enter(Op::QuestionFetch);
        yield_now().await;
        self.injected(Op::QuestionFetch)?;

        Ok(self
            .tables
            .borrow()
            .questions
            .values()
            .filter(|question| question.active)
            .cloned()
            .collect())
    }
}

impl RespondentStore for MemoryStore {
    type Error = MemoryStoreError;

    async fn create_respondent(&self, respondent: NewRespondent) -> Result<Respondent, Self::Error> {
        self.enter(Op::RespondentInsert);
        yield_now().await;
        self.injected(Op::RespondentInsert)?;

        let mut tables = self.tables.borrow_mut();
        let id = RespondentId(tables.next_respondent_id);
        tables.next_respondent_id += 1;

        let row = Respondent {
            id,
            biodata: respondent.biodata,
            comment: respondent.comment,
            created_at: Utc::now(),
        };
        tables.respondents.push(row.clone());
        Ok(row)
    }
}

impl AnswerStore for MemoryStore {
    type Error = MemoryStoreError;

    async fn create_answers(&self, answers: Vec<AnswerRecord>) -> Result<(), Self::Error> {
        self.enter(Op::AnswerInsert);
        yield_now().await;
        self.injected(Op::AnswerInsert)?;

        let mut tables = self.tables.borrow_mut();
        for answer in &answers {
            if !tables.questions.contains_key(&answer.question_id) {
                return Err(MemoryStoreError::UnknownQuestion(answer.question_id));
            }
            if !tables.respondents.iter().any(|r| r.id == answer.respondent_id) {
                return Err(MemoryStoreError::UnknownRespondent(answer.respondent_id));
            }
        }
        tables.answers.extend(answers);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use citizen_survey_types::Score;

    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new().with_questions([
            Question::new(2, "Bagaimana kecepatan waktu pelayanan?", Category::Timeliness),
            Question::new(1, "Bagaimana kemudahan persyaratan pelayanan?", Category::Service),
            Question::new(3, "Apakah ruang tunggu nyaman?", Category::Facilities).inactive(),
        ])
    }

    #[tokio::test]
    async fn lists_only_active_questions_in_id_order() {
        let questions = store().list_active_questions().await.unwrap();
        let ids: Vec<_> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![QuestionId(1), QuestionId(2)]);
    }

    #[tokio::test]
    async fn injected_failures_carry_the_message() {
        let store = store();
        store.fail_question_fetches(Some("connection refused"));

        let err = store.list_active_questions().await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(store.calls().question_fetches, 1);

        store.fail_question_fetches(None);
        assert!(store.list_active_questions().await.is_ok());
    }

    #[tokio::test]
    async fn answer_batch_is_all_or_nothing() {
        let store = store();
        let respondent = store
            .create_respondent(NewRespondent {
                biodata: Default::default(),
                comment: String::new(),
            })
            .await
            .unwrap();

        let good = AnswerRecord {
            respondent_id: respondent.id,
            question_id: QuestionId(1),
            score: Score::new(4).unwrap(),
        };
        let dangling = AnswerRecord {
            question_id: QuestionId(99),
            ..good
        };

        let err = store.create_answers(vec![good, dangling]).await.unwrap_err();
        assert_eq!(err, MemoryStoreError::UnknownQuestion(QuestionId(99)));
        assert!(store.answers().is_empty());
    }

    #[test]
    fn removing_a_question_removes_its_answers() {
        let store = store()
            .with_respondent(Respondent {
                id: RespondentId(1),
                biodata: Default::default(),
                comment: String::new(),
                created_at: Utc::now(),
            })
            .with_answer(AnswerRecord {
                respondent_id: RespondentId(1),
                question_id: QuestionId(2),
                score: Score::new(3).unwrap(),
            });

        store.remove_question(QuestionId(2)).unwrap();
        assert!(store.answers().is_empty());
        assert_eq!(
            store.remove_question(QuestionId(2)),
            Err(MemoryStoreError::UnknownQuestion(QuestionId(2)))
        );
    }

    #[test]
    fn inserted_questions_get_fresh_ids() {
        let store = store();
        let question = store.insert_question("Apakah petugas ramah?", Category::Staff);
        assert_eq!(question.id, QuestionId(4));
        assert!(question.active);
    }
}
