use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{UnknownLabel, ValidationError, WizardConfig};

/// Respondent gender as recorded in the `jk` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "L")]
    Male,
    #[serde(rename = "P")]
    Female,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Male => "L",
            Self::Female => "P",
        }
    }
}

impl FromStr for Gender {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" => Ok(Self::Male),
            "P" => Ok(Self::Female),
            other => Err(UnknownLabel::new("gender", other)),
        }
    }
}

/// Highest completed education.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "SD")]
    Elementary,
    #[serde(rename = "SMP")]
    JuniorHigh,
    #[serde(rename = "SMA")]
    SeniorHigh,
    #[serde(rename = "SMK")]
    Vocational,
    #[serde(rename = "D3")]
    Diploma,
    #[serde(rename = "S1")]
    Bachelor,
    #[serde(rename = "Lainnya")]
    Other,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 7] = [
        Self::Elementary,
        Self::JuniorHigh,
        Self::SeniorHigh,
        Self::Vocational,
        Self::Diploma,
        Self::Bachelor,
        Self::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Elementary => "SD",
            Self::JuniorHigh => "SMP",
            Self::SeniorHigh => "SMA",
            Self::Vocational => "SMK",
            Self::Diploma => "D3",
            Self::Bachelor => "S1",
            Self::Other => "Lainnya",
        }
    }
}

impl FromStr for EducationLevel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.code() == s)
            .ok_or_else(|| UnknownLabel::new("education level", s))
    }
}

/// The public service the respondent came in for.
///
/// Only collected by deployments that list [`FieldName::ServiceReceived`]
/// among their required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceReceived {
    #[serde(rename = "Pembuatan KTP")]
    IdentityCard,
    #[serde(rename = "Kartu Keluarga")]
    FamilyCard,
    #[serde(rename = "Surat Keterangan")]
    CertificateLetter,
    #[serde(rename = "Lainnya")]
    Other,
}

/// Names of the biodata fields, used to configure which ones are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Name,
    Gender,
    Age,
    Education,
    Occupation,
    ServiceReceived,
}

impl FieldName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Education => "education",
            Self::Occupation => "occupation",
            Self::ServiceReceived => "service_received",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(Self::Name),
            "gender" => Ok(Self::Gender),
            "age" => Ok(Self::Age),
            "education" => Ok(Self::Education),
            "occupation" => Ok(Self::Occupation),
            "service_received" => Ok(Self::ServiceReceived),
            other => Err(UnknownLabel::new("field", other)),
        }
    }
}

/// The respondent's biodata draft.
///
/// Every field starts out empty. The wizard refuses to leave the biodata
/// step until [`Biodata::validate`] passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biodata {
    #[serde(rename = "nama")]
    pub name: String,

    #[serde(rename = "jk")]
    pub gender: Option<Gender>,

    #[serde(rename = "usia")]
    pub age: Option<u32>,

    #[serde(rename = "pendidikan")]
    pub education: Option<EducationLevel>,

    #[serde(rename = "pekerjaan")]
    pub occupation: String,

    #[serde(
        rename = "layanan_diterima",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub service_received: Option<ServiceReceived>,
}

impl Biodata {
    /// Whether the given field holds a value. Whitespace-only text counts as empty.
    pub fn is_filled(&self, field: FieldName) -> bool {
        match field {
            FieldName::Name => !self.name.trim().is_empty(),
            FieldName::Gender => self.gender.is_some(),
            FieldName::Age => self.age.is_some_and(|age| age > 0),
            FieldName::Education => self.education.is_some(),
            FieldName::Occupation => !self.occupation.trim().is_empty(),
            FieldName::ServiceReceived => self.service_received.is_some(),
        }
    }

    /// Check the draft against the deployment's rules.
    ///
    /// Reports the first missing required field (in [`FieldName`] order), then
    /// an age below the configured minimum.
    pub fn validate(&self, config: &WizardConfig) -> Result<(), ValidationError> {
        if let Some(field) = config
            .required_fields
            .iter()
            .copied()
            .find(|field| !self.is_filled(*field))
        {
            return Err(ValidationError::MissingField(field));
        }

        match self.age {
            Some(age) if age < config.minimum_age => Err(ValidationError::AgeBelowMinimum {
                age,
                minimum: config.minimum_age,
            }),
            _ => Ok(()),
        }
    }
}
