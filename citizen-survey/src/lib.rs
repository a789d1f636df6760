//! # citizen-survey
//!
//! A multi-step citizen satisfaction survey. Storage-agnostic.
//!
//! The [`Wizard`] walks a respondent through
//! `Intro → Biodata → Question 1..N → Comment → Success`, collects one Likert
//! score per active question, and stores the result through the
//! [`RespondentStore`] and [`AnswerStore`] traits.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use citizen_survey::{Gender, EducationLevel, MemoryStore, Score, Submission, Wizard, WizardConfig};
//!
//! let mut wizard = Wizard::start(store, WizardConfig::default()).await;
//! wizard.begin()?;
//!
//! let biodata = wizard.edit_biodata()?;
//! biodata.name = "Budi Santoso".into();
//! biodata.gender = Some(Gender::Male);
//! biodata.age = Some(45);
//! biodata.education = Some(EducationLevel::Bachelor);
//! biodata.occupation = "Wiraswasta".into();
//! wizard.start_questions()?;
//!
//! for _ in 0..wizard.questions().len() {
//!     wizard.record_answer(Score::new(4)?)?;
//!     wizard.next()?;
//! }
//!
//! wizard.set_comment("Ruang tunggu dingin.")?;
//! let Submission::Completed(id) = wizard.submit().await? else { unreachable!() };
//! ```
//!
//! ## Submission
//!
//! Submitting writes the respondent row first and the answer batch second.
//! The two writes are not a transaction: when the answer batch fails, the
//! respondent row stays, and submitting again stores a second respondent.
//!
//! ## Stores
//!
//! Stores are separate implementations of the store traits. This crate ships
//! [`MemoryStore`], which keeps every table in memory and can be told to fail.

// Re-export all types from citizen-survey-types
pub use citizen_survey_types::*;

mod error;
pub use error::WizardError;

mod wizard;
pub use wizard::{Step, Submission, Wizard, progress_percent};

// In-memory store for running the wizard without a database
mod memory_store;
pub use memory_store::{CallCounts, MemoryStore, MemoryStoreError};
