use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A satisfaction score on the five-point Likert scale.
///
/// The only way to obtain a `Score` is through [`Score::new`] (or
/// `TryFrom<u8>`), so every value in an answer sheet is within 1–5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::ScoreOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// All five scores, lowest first.
    pub fn all() -> impl Iterator<Item = Score> {
        (Self::MIN..=Self::MAX).map(Score)
    }

    /// The label shown next to the option.
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Sangat Tidak Puas",
            2 => "Tidak Puas",
            3 => "Cukup Puas",
            4 => "Puas",
            _ => "Sangat Puas",
        }
    }
}

impl TryFrom<u8> for Score {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_likert_range() {
        let values: Vec<u8> = Score::all().map(Score::value).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            Score::new(0),
            Err(ValidationError::ScoreOutOfRange(0))
        ));
        assert!(Score::new(6).is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(Score::new(1).unwrap().label(), "Sangat Tidak Puas");
        assert_eq!(Score::new(5).unwrap().label(), "Sangat Puas");
    }

    #[test]
    fn deserializing_checks_the_range() {
        assert!(serde_json::from_str::<Score>("4").is_ok());
        assert!(serde_json::from_str::<Score>("9").is_err());
    }
}
