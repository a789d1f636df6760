use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Identifier of a question row. Also the ordering key of a survey run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub i64);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for QuestionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A single survey question as stored in the `questions` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Server-assigned identifier.
    pub id: QuestionId,

    /// The prompt text shown to the respondent.
    #[serde(rename = "pertanyaan")]
    pub text: String,

    /// Classification label.
    #[serde(rename = "kategori")]
    pub category: Category,

    /// Only active questions are part of a survey run.
    #[serde(rename = "status")]
    pub active: bool,
}

impl Question {
    /// Create a new active question.
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category,
            active: true,
        }
    }

    /// Mark the question as inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// The fixed set of question categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Service procedures and requirements.
    #[serde(rename = "Pelayanan")]
    Service,

    /// Facilities and infrastructure.
    #[serde(rename = "Fasilitas")]
    Facilities,

    /// Staff conduct and competence.
    #[serde(rename = "SDM")]
    Staff,

    /// Service timeliness.
    #[serde(rename = "Waktu")]
    Timeliness,

    #[serde(rename = "Lainnya")]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Service,
        Category::Facilities,
        Category::Staff,
        Category::Timeliness,
        Category::Other,
    ];

    /// The label stored in the database.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Service => "Pelayanan",
            Self::Facilities => "Fasilitas",
            Self::Staff => "SDM",
            Self::Timeliness => "Waktu",
            Self::Other => "Lainnya",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| UnknownLabel::new("category", s))
    }
}

/// A label that does not belong to one of the fixed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{label}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub label: String,
}

impl UnknownLabel {
    pub fn new(kind: &'static str, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}
