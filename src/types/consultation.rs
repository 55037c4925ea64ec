//! Consultation input record and pipeline profile selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Year assumed when the supplied year is absent or unparseable.
pub const FALLBACK_YEAR: i32 = 1446;

fn default_year() -> i32 {
    FALLBACK_YEAR
}

/// The full input parameter set for one calculation.
///
/// Calendrical and astrological fields are plain table keys; a key that
/// resolves to no table entry contributes 0 to its factor. The hour lord
/// is accepted for completeness but consumed by no pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultation {
    /// The question text.
    pub question: String,
    /// Name of the asker.
    #[serde(default)]
    pub asker_name: String,
    /// Name of the asker's mother, if given.
    #[serde(default)]
    pub mother_name: Option<String>,
    /// Weekday name.
    #[serde(default)]
    pub day: String,
    /// Hijri month name.
    #[serde(default)]
    pub month: String,
    /// Hijri year.
    #[serde(default = "default_year")]
    pub year: i32,
    /// Rising-sign name.
    #[serde(default)]
    pub rising_sign: String,
    /// Moon-sign name.
    #[serde(default)]
    pub moon_sign: String,
    /// Lunar-mansion name.
    #[serde(default)]
    pub moon_mansion: String,
    /// Hour-lord name (validation-side only).
    #[serde(default)]
    pub hour_lord: String,
}

impl Consultation {
    /// Parse a year string, falling back to [`FALLBACK_YEAR`].
    pub fn parse_year(s: &str) -> i32 {
        s.trim().parse().unwrap_or(FALLBACK_YEAR)
    }
}

/// Which derivation profile the engine runs.
///
/// Both profiles are fully deterministic; classic is the wired default,
/// weighted swaps in positional-weighting variants of the entrances,
/// base-line synthesis, ratio lines, power substitution and decimation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// The classic derivation.
    #[default]
    Classic,
    /// The positional-weighting variant.
    Weighted,
}

impl Profile {
    /// Parse profile from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Self::Classic),
            "weighted" => Some(Self::Weighted),
            _ => None,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Weighted => write!(f, "weighted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_fallback() {
        assert_eq!(Consultation::parse_year("1446"), 1446);
        assert_eq!(Consultation::parse_year(" 1440 "), 1440);
        assert_eq!(Consultation::parse_year("not a year"), FALLBACK_YEAR);
        assert_eq!(Consultation::parse_year(""), FALLBACK_YEAR);
    }

    #[test]
    fn test_consultation_deserializes_with_defaults() {
        let c: Consultation = serde_json::from_str(r#"{"question": "هل أنجح"}"#).unwrap();
        assert_eq!(c.question, "هل أنجح");
        assert_eq!(c.year, FALLBACK_YEAR);
        assert_eq!(c.mother_name, None);
        assert!(c.day.is_empty());
    }

    #[test]
    fn test_profile_round_trip() {
        assert_eq!(Profile::from_str("classic"), Some(Profile::Classic));
        assert_eq!(Profile::from_str("WEIGHTED"), Some(Profile::Weighted));
        assert_eq!(Profile::from_str("fast"), None);
        assert_eq!(Profile::default(), Profile::Classic);
    }
}
