//! Row shapes written to and read from the backing tables.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Biodata, QuestionId, Score};

/// Server-assigned identifier of a respondent row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RespondentId(pub i64);

impl fmt::Display for RespondentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Insert payload for the `respondents` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRespondent {
    #[serde(flatten)]
    pub biodata: Biodata,

    /// Free-text criticism and suggestions, possibly empty.
    #[serde(rename = "kritik_saran")]
    pub comment: String,
}

/// A persisted respondent row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Respondent {
    pub id: RespondentId,

    #[serde(flatten)]
    pub biodata: Biodata,

    #[serde(rename = "kritik_saran")]
    pub comment: String,

    pub created_at: DateTime<Utc>,
}

impl Respondent {
    /// Whether the respondent left a non-blank comment.
    pub fn has_comment(&self) -> bool {
        !self.comment.trim().is_empty()
    }
}

/// One row of the `survey_answers` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub respondent_id: RespondentId,
    pub question_id: QuestionId,
    #[serde(rename = "skor")]
    pub score: Score,
}
