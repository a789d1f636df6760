use crate::{FieldName, QuestionId};

/// A locally detected problem with the respondent's input.
///
/// Validation errors never change wizard state; the offending transition is
/// simply refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required biodata field is empty.
    #[error("please fill in the {0} field before continuing")]
    MissingField(FieldName),

    #[error("respondents must be at least {minimum} years old (got {age})")]
    AgeBelowMinimum { age: u32, minimum: u32 },

    /// The question list is empty, either because loading it failed or
    /// because no question is active.
    #[error("questions are still loading or the connection failed, try again later")]
    NoActiveQuestions,

    #[error("choose a score for question {0} before continuing")]
    Unanswered(QuestionId),

    #[error("score {0} is outside the 1-5 scale")]
    ScoreOutOfRange(u8),
}

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    pub fn invalid(key: &'static str, message: impl ToString) -> Self {
        Self::Invalid {
            key,
            message: message.to_string(),
        }
    }
}
