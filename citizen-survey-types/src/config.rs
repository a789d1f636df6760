//! Per-deployment settings.
//!
//! Two deployments of the survey disagree on whether the received service is
//! asked for and on how the dashboard buckets its trend chart. Both are
//! explicit settings here rather than merged behaviour.

use std::{collections::BTreeSet, env, fmt::Display, str::FromStr};

use tracing::{info, warn};

use crate::{ConfigError, FieldName, UnknownLabel};

pub const DEFAULT_MINIMUM_AGE: u32 = 15;

/// Settings for the survey wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    /// Biodata fields that must be filled before the questions start.
    pub required_fields: BTreeSet<FieldName>,

    /// Youngest accepted respondent age.
    pub minimum_age: u32,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            required_fields: BTreeSet::from([
                FieldName::Name,
                FieldName::Gender,
                FieldName::Age,
                FieldName::Education,
                FieldName::Occupation,
            ]),
            minimum_age: DEFAULT_MINIMUM_AGE,
        }
    }
}

impl WizardConfig {
    /// Load from `SURVEY_REQUIRED_FIELDS` and `SURVEY_MINIMUM_AGE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary key lookup instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let fields: FieldList = try_load(
            &lookup,
            "SURVEY_REQUIRED_FIELDS",
            "name,gender,age,education,occupation",
        )?;

        Ok(Self {
            required_fields: fields.0,
            minimum_age: try_load(&lookup, "SURVEY_MINIMUM_AGE", "15")?,
        })
    }

    /// Add a field to the required set.
    pub fn require(mut self, field: FieldName) -> Self {
        self.required_fields.insert(field);
        self
    }

    /// Remove a field from the required set.
    pub fn optional(mut self, field: FieldName) -> Self {
        self.required_fields.remove(&field);
        self
    }

    pub fn with_minimum_age(mut self, minimum_age: u32) -> Self {
        self.minimum_age = minimum_age;
        self
    }
}

/// How the dashboard assigns respondents to its five daily trend buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendBucketing {
    /// One bucket per calendar day, the last one being today.
    #[default]
    CalendarAligned,

    /// One bucket per elapsed 24-hour period counted back from now.
    RollingOffset,
}

impl FromStr for TrendBucketing {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "calendar" | "calendar_aligned" => Ok(Self::CalendarAligned),
            "rolling" | "rolling_offset" => Ok(Self::RollingOffset),
            other => Err(UnknownLabel::new("trend bucketing", other)),
        }
    }
}

/// Comma-separated list of field names.
struct FieldList(BTreeSet<FieldName>);

impl FromStr for FieldList {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map(FieldList)
    }
}

/// Read `key` through `lookup`, falling back to `default` when it is unset.
pub fn try_load<T: FromStr>(
    lookup: &dyn Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        ConfigError::invalid(key, e)
    })
}
