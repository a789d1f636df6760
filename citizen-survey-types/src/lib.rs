//! Core types for the citizen-survey crates.
//!
//! This crate provides the foundational types for running a satisfaction survey:
//! - `Question` and `Category` - The question bank
//! - `Biodata` and `WizardConfig` - The respondent draft and its validation rules
//! - `Score` and `AnswerSheet` - Likert answers collected during a run
//! - `NewRespondent`, `Respondent` and `AnswerRecord` - Persisted rows
//! - `QuestionStore`, `RespondentStore` and `AnswerStore` - Backend traits

mod question;
pub use question::{Category, Question, QuestionId, UnknownLabel};

mod score;
pub use score::Score;

mod biodata;
pub use biodata::{Biodata, EducationLevel, FieldName, Gender, ServiceReceived};

mod answers;
pub use answers::AnswerSheet;

mod records;
pub use records::{AnswerRecord, NewRespondent, Respondent, RespondentId};

pub mod config;
pub use config::{TrendBucketing, WizardConfig};

mod error;
pub use error::{ConfigError, ValidationError};

mod traits;
pub use traits::{AnswerStore, QuestionStore, RespondentStore};
