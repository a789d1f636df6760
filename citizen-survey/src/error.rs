use citizen_survey_types::{RespondentId, ValidationError};

use crate::Step;

/// Error type for wizard actions.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// The respondent's input does not allow the transition.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The action has no transition from the current step.
    #[error("cannot {action} at the {step} step")]
    WrongStep { action: &'static str, step: Step },

    /// Inserting the respondent row failed. Nothing was stored.
    #[error("{0:#}")]
    RespondentWrite(anyhow::Error),

    /// Inserting the answer batch failed after the respondent row was stored.
    ///
    /// The respondent row is not rolled back. Submitting again stores a
    /// second respondent.
    #[error("{error:#}")]
    AnswerWrite {
        respondent: RespondentId,
        error: anyhow::Error,
    },
}

impl WizardError {
    /// Check if this error is a refused transition caused by the respondent's input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_wrong_step(&self) -> bool {
        matches!(self, Self::WrongStep { .. })
    }

    /// Check if this error came from the backing store.
    pub fn is_write(&self) -> bool {
        matches!(self, Self::RespondentWrite(_) | Self::AnswerWrite { .. })
    }

    /// The respondent row left behind without answers, if any.
    pub fn orphaned_respondent(&self) -> Option<RespondentId> {
        match self {
            Self::AnswerWrite { respondent, .. } => Some(*respondent),
            _ => None,
        }
    }
}
