//! # citizen-survey-admin
//!
//! The administrative side of the citizen survey: signing in, managing the
//! question bank, reviewing and deleting submissions, and the dashboard
//! numbers.
//!
//! ```rust,ignore
//! use citizen_survey::MemoryStore;
//! use citizen_survey_admin::{AdminConfig, AdminPanel, AdminProfile, Credentials, SessionAuth};
//!
//! let config = AdminConfig::from_env()?;
//! let auth = SessionAuth::new(config.session_ttl()).with_account(profile, "rahasia");
//! let panel = AdminPanel::new(auth, MemoryStore::new(), config);
//!
//! panel.login(&Credentials::new("petugas", "rahasia"))?;
//! let stats = panel.dashboard().await?;
//! println!("average score: {}", stats.average_score_display());
//! ```

mod error;
pub use error::{AdminError, AuthError};

mod auth;
pub use auth::{AdminAuth, AdminProfile, Credentials, Session, SessionAuth, password_digest};

mod config;
pub use config::{AdminConfig, DEFAULT_SESSION_TTL_MINUTES};

mod questions;
pub use questions::{QuestionAdmin, QuestionDraft};

mod feedback;
pub use feedback::FeedbackAdmin;

mod dashboard;
pub use dashboard::{DashboardStats, TREND_DAYS, TrendBuckets, load_dashboard};

mod memory;

mod panel;
pub use panel::AdminPanel;
