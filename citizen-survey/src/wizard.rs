//! The survey wizard state machine and submission protocol.

use std::{cell::Cell, fmt};

use citizen_survey_types::{
    AnswerSheet, AnswerStore, Biodata, NewRespondent, Question, QuestionStore, RespondentId,
    RespondentStore, Score, ValidationError, WizardConfig,
};
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::WizardError;

/// The step the wizard is currently showing.
///
/// Steps only ever move along
/// `Intro → Biodata → Question(0..N) → Comment → Success`, with back-edges
/// from the biodata, question and comment steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Intro,
    Biodata,
    /// Index into the wizard's question list.
    Question(usize),
    Comment,
    Success,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intro => f.write_str("intro"),
            Self::Biodata => f.write_str("biodata"),
            Self::Question(index) => write!(f, "question {}", index + 1),
            Self::Comment => f.write_str("comment"),
            Self::Success => f.write_str("success"),
        }
    }
}

/// Outcome of a submit action that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Both writes succeeded and the wizard is at [`Step::Success`].
    Completed(RespondentId),

    /// Another submission is still running; this call did nothing.
    AlreadyInFlight,
}

/// Percentage of the question set reached at `index`, rounded half up.
///
/// Returns 0 for an empty question set.
pub fn progress_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let reached = (index + 1).min(total);
    ((200 * reached + total) / (2 * total)) as u8
}

/// Clears the busy flag when the submission ends, however it ends.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// One run of the satisfaction survey.
///
/// The wizard owns all scratch state of the run: the biodata draft, the
/// answer sheet and the comment. Nothing reaches the store before
/// [`Wizard::submit`].
///
/// Transitions take `&mut self`; only `submit` takes `&self`, so the
/// borrow checker keeps every other action out while a submission is
/// pending. Overlapping submissions on the same task are turned away by
/// the busy flag.
#[derive(Debug)]
pub struct Wizard<S> {
    store: S,
    config: WizardConfig,
    questions: Vec<Question>,
    step: Cell<Step>,
    biodata: Biodata,
    answers: AnswerSheet,
    comment: String,
    submitting: Cell<bool>,
}

impl<S> Wizard<S>
where
    S: QuestionStore + RespondentStore + AnswerStore,
{
    /// Create a wizard at the intro step, loading the active questions.
    ///
    /// A failed load is logged and leaves the question list empty; the
    /// wizard then refuses to start the questions.
    pub async fn start(store: S, config: WizardConfig) -> Self {
        let questions = match store.list_active_questions().await {
            Ok(questions) => questions,
            Err(err) => {
                let err: anyhow::Error = err.into();
                warn!("Failed to load questions: {err:#}");
                Vec::new()
            }
        };
        debug!(count = questions.len(), "Loaded active questions");

        Self {
            store,
            config,
            questions,
            step: Cell::new(Step::Intro),
            biodata: Biodata::default(),
            answers: AnswerSheet::new(),
            comment: String::new(),
            submitting: Cell::new(false),
        }
    }

    /// Throw this run away and start a fresh one over the same store.
    pub async fn restart(self) -> Self {
        info!(step = %self.step(), "Restarting survey");
        Self::start(self.store, self.config).await
    }

    /// Store the respondent and their answers, then move to [`Step::Success`].
    ///
    /// Runs the two writes in order: the respondent row first, then one
    /// batch of answer rows keyed by the new respondent id. A failure of
    /// either write leaves the wizard at [`Step::Comment`]. A failed answer
    /// write does not remove the respondent row (see
    /// [`WizardError::AnswerWrite`]).
    ///
    /// Calling this while a previous call is still pending returns
    /// [`Submission::AlreadyInFlight`] without touching the store.
    pub async fn submit(&self) -> Result<Submission, WizardError> {
        let Some(_in_flight) = InFlight::acquire(&self.submitting) else {
            debug!("Submission already in flight, ignoring");
            return Ok(Submission::AlreadyInFlight);
        };

        if self.step() != Step::Comment {
            return Err(self.wrong_step("submit"));
        }

        let span = info_span!("submit", answers = self.answers.len());
        self.write_submission().instrument(span).await
    }

    async fn write_submission(&self) -> Result<Submission, WizardError> {
        let respondent = NewRespondent {
            biodata: self.biodata.clone(),
            comment: self.comment.clone(),
        };

        let created = self
            .store
            .create_respondent(respondent)
            .await
            .map_err(|err| {
                let err: anyhow::Error = err.into();
                error!("Failed to store respondent: {err:#}");
                WizardError::RespondentWrite(err)
            })?;

        let batch = self.answers.to_records(created.id);
        debug!(respondent = %created.id, rows = batch.len(), "Storing answers");

        self.store.create_answers(batch).await.map_err(|err| {
            let err: anyhow::Error = err.into();
            error!(
                respondent = %created.id,
                "Failed to store answers, respondent row kept without answers: {err:#}"
            );
            WizardError::AnswerWrite {
                respondent: created.id,
                error: err,
            }
        })?;

        info!(respondent = %created.id, "Survey submitted");
        self.go(Step::Success);
        Ok(Submission::Completed(created.id))
    }
}

impl<S> Wizard<S> {
    // === Transitions ===

    /// Intro → Biodata.
    pub fn begin(&mut self) -> Result<(), WizardError> {
        if self.step() != Step::Intro {
            return Err(self.wrong_step("begin"));
        }
        self.go(Step::Biodata);
        Ok(())
    }

    /// Biodata → first question, once the biodata is complete and questions are loaded.
    pub fn start_questions(&mut self) -> Result<(), WizardError> {
        if self.step() != Step::Biodata {
            return Err(self.wrong_step("start the questions"));
        }
        self.biodata.validate(&self.config)?;
        if self.questions.is_empty() {
            return Err(ValidationError::NoActiveQuestions.into());
        }
        self.go(Step::Question(0));
        Ok(())
    }

    /// Record (or overwrite) the score for the question on screen.
    ///
    /// Does not advance; see [`Wizard::next`].
    pub fn record_answer(&mut self, score: Score) -> Result<(), WizardError> {
        let Step::Question(index) = self.step() else {
            return Err(self.wrong_step("record an answer"));
        };
        let question = self.questions[index].id;
        if let Some(previous) = self.answers.record(question, score) {
            debug!(%question, %previous, %score, "Score changed");
        }
        Ok(())
    }

    /// Move past the question on screen; after the last one, on to the comment.
    pub fn next(&mut self) -> Result<(), WizardError> {
        let Step::Question(index) = self.step() else {
            return Err(self.wrong_step("advance"));
        };
        let question = self.questions[index].id;
        if !self.answers.contains(question) {
            return Err(ValidationError::Unanswered(question).into());
        }

        if index + 1 < self.questions.len() {
            self.go(Step::Question(index + 1));
        } else {
            self.go(Step::Comment);
        }
        Ok(())
    }

    /// Go back one step. Keeps everything entered so far.
    pub fn back(&mut self) -> Result<(), WizardError> {
        let previous = match self.step() {
            Step::Biodata => Step::Intro,
            Step::Question(0) => Step::Biodata,
            Step::Question(index) => Step::Question(index - 1),
            Step::Comment => Step::Question(self.questions.len().saturating_sub(1)),
            Step::Intro | Step::Success => return Err(self.wrong_step("go back")),
        };
        self.go(previous);
        Ok(())
    }

    /// The biodata draft, editable only at the biodata step.
    pub fn edit_biodata(&mut self) -> Result<&mut Biodata, WizardError> {
        if self.step() != Step::Biodata {
            return Err(self.wrong_step("edit the biodata"));
        }
        Ok(&mut self.biodata)
    }

    /// Replace the comment, only at the comment step.
    pub fn set_comment(&mut self, comment: impl Into<String>) -> Result<(), WizardError> {
        if self.step() != Step::Comment {
            return Err(self.wrong_step("edit the comment"));
        }
        self.comment = comment.into();
        Ok(())
    }

    fn go(&self, step: Step) {
        debug!(from = %self.step(), to = %step, "Wizard transition");
        self.step.set(step);
    }

    fn wrong_step(&self, action: &'static str) -> WizardError {
        WizardError::WrongStep {
            action,
            step: self.step(),
        }
    }

    // === Accessors ===

    pub fn step(&self) -> Step {
        self.step.get()
    }

    /// The active questions of this run, in order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question on screen, if the wizard is at a question step.
    pub fn current_question(&self) -> Option<&Question> {
        match self.step() {
            Step::Question(index) => self.questions.get(index),
            _ => None,
        }
    }

    /// The score already recorded for the question on screen.
    pub fn current_answer(&self) -> Option<Score> {
        self.current_question()
            .and_then(|question| self.answers.get(question.id))
    }

    /// Whether [`Wizard::next`] would be accepted right now.
    pub fn can_advance(&self) -> bool {
        self.current_answer().is_some()
    }

    /// Progress bar value in percent.
    ///
    /// 0 before the questions, 100 from the comment step on.
    pub fn progress(&self) -> u8 {
        match self.step() {
            Step::Intro | Step::Biodata => 0,
            Step::Question(index) => progress_percent(index, self.questions.len()),
            Step::Comment | Step::Success => 100,
        }
    }

    pub fn biodata(&self) -> &Biodata {
        &self.biodata
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Whether a submission is currently pending.
    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
