use chrono::Utc;
use citizen_survey::{AnswerRecord, Category, Question, QuestionId, Respondent, RespondentId};
use tracing::info;

use crate::{
    AdminAuth, AdminConfig, AdminError, Credentials, DashboardStats, FeedbackAdmin, QuestionAdmin,
    QuestionDraft, Session, load_dashboard,
};

/// The admin area: every operation requires a valid session.
///
/// A request made without one fails with [`AdminError::Unauthenticated`]
/// and never reaches the store.
#[derive(Debug)]
pub struct AdminPanel<A, S> {
    auth: A,
    store: S,
    config: AdminConfig,
}

impl<A: AdminAuth, S> AdminPanel<A, S> {
    pub fn new(auth: A, store: S, config: AdminConfig) -> Self {
        Self {
            auth,
            store,
            config,
        }
    }

    pub fn login(&self, credentials: &Credentials) -> Result<Session, AdminError> {
        Ok(self.auth.login(credentials)?)
    }

    pub fn logout(&self) {
        self.auth.logout();
    }

    /// The current session, or why there is none.
    pub fn session(&self) -> Result<Session, AdminError> {
        Ok(self.auth.current_session()?)
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }
}

impl<A, S> AdminPanel<A, S>
where
    A: AdminAuth,
    S: QuestionAdmin,
{
    pub async fn questions(&self) -> Result<Vec<Question>, AdminError> {
        self.session()?;
        self.store.list_questions().await.map_err(AdminError::store)
    }

    pub async fn create_question(
        &self,
        text: &str,
        category: Category,
    ) -> Result<Question, AdminError> {
        let session = self.session()?;
        let draft = QuestionDraft::new(text, category)?;
        let question = self
            .store
            .create_question(draft)
            .await
            .map_err(AdminError::store)?;

        info!(admin = %session.admin.username, id = %question.id, "Question created");
        Ok(question)
    }

    pub async fn update_question(
        &self,
        id: QuestionId,
        text: &str,
        category: Category,
    ) -> Result<Question, AdminError> {
        let session = self.session()?;
        let draft = QuestionDraft::new(text, category)?;
        let question = self
            .store
            .update_question(id, draft)
            .await
            .map_err(AdminError::store)?;

        info!(admin = %session.admin.username, %id, "Question updated");
        Ok(question)
    }

    pub async fn set_question_active(
        &self,
        id: QuestionId,
        active: bool,
    ) -> Result<Question, AdminError> {
        let session = self.session()?;
        let question = self
            .store
            .set_question_active(id, active)
            .await
            .map_err(AdminError::store)?;

        info!(admin = %session.admin.username, %id, active, "Question status changed");
        Ok(question)
    }

    pub async fn delete_question(&self, id: QuestionId) -> Result<(), AdminError> {
        let session = self.session()?;
        self.store
            .delete_question(id)
            .await
            .map_err(AdminError::store)?;

        info!(admin = %session.admin.username, %id, "Question deleted");
        Ok(())
    }
}

impl<A, S> AdminPanel<A, S>
where
    A: AdminAuth,
    S: FeedbackAdmin,
{
    /// Respondents, newest first.
    pub async fn respondents(&self) -> Result<Vec<Respondent>, AdminError> {
        self.session()?;
        self.store.list_respondents().await.map_err(AdminError::store)
    }

    /// The answers one respondent gave, in question order.
    pub async fn answers_of(&self, id: RespondentId) -> Result<Vec<AnswerRecord>, AdminError> {
        self.session()?;
        let mut answers: Vec<_> = self
            .store
            .list_answers()
            .await
            .map_err(AdminError::store)?
            .into_iter()
            .filter(|answer| answer.respondent_id == id)
            .collect();
        answers.sort_by_key(|answer| answer.question_id);
        Ok(answers)
    }

    pub async fn delete_respondent(&self, id: RespondentId) -> Result<(), AdminError> {
        let session = self.session()?;
        self.store
            .delete_respondent(id)
            .await
            .map_err(AdminError::store)?;

        info!(admin = %session.admin.username, respondent = %id, "Respondent deleted");
        Ok(())
    }

    /// Dashboard statistics as of now, with calendar dates taken in the
    /// configured offset.
    pub async fn dashboard(&self) -> Result<DashboardStats, AdminError> {
        self.session()?;
        let now = Utc::now().with_timezone(&self.config.utc_offset);
        load_dashboard(&self.store, &now, self.config.trend_bucketing).await
    }
}
