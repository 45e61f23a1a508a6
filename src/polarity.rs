//! Three-way polarity labels produced by heuristics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a heuristic for one document.
///
/// `Abstain` is the default: a heuristic that finds nothing to say abstains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// The finding is affirmed present (seizure, abnormal study).
    Positive,
    /// The finding is affirmed absent (no seizure, normal study).
    Negative,
    /// No determination.
    Abstain,
}

impl Polarity {
    /// Numeric encoding used by label matrices: 1 / -1 / 0.
    pub fn label_value(self) -> i8 {
        match self {
            Polarity::Positive => 1,
            Polarity::Negative => -1,
            Polarity::Abstain => 0,
        }
    }

    /// Inverse of [`label_value`](Self::label_value).
    pub fn from_label_value(value: i8) -> Option<Self> {
        match value {
            1 => Some(Polarity::Positive),
            -1 => Some(Polarity::Negative),
            0 => Some(Polarity::Abstain),
            _ => None,
        }
    }

    pub fn is_abstain(self) -> bool {
        self == Polarity::Abstain
    }
}

impl Default for Polarity {
    fn default() -> Self {
        Polarity::Abstain
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
            Polarity::Abstain => "abstain",
        })
    }
}

impl FromStr for Polarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" | "1" => Ok(Polarity::Positive),
            "negative" | "-1" => Ok(Polarity::Negative),
            "abstain" | "0" => Ok(Polarity::Abstain),
            other => Err(format!("unknown polarity: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_values_partition() {
        assert_eq!(Polarity::Positive.label_value(), 1);
        assert_eq!(Polarity::Negative.label_value(), -1);
        assert_eq!(Polarity::Abstain.label_value(), 0);
        assert_eq!(Polarity::from_label_value(2), None);
        assert_eq!(Polarity::from_label_value(-1), Some(Polarity::Negative));
    }

    #[test]
    fn parses_names_and_numbers() {
        assert_eq!("Positive".parse::<Polarity>(), Ok(Polarity::Positive));
        assert_eq!(" -1 ".parse::<Polarity>(), Ok(Polarity::Negative));
        assert!("maybe".parse::<Polarity>().is_err());
    }

    #[test]
    fn default_is_abstain() {
        assert!(Polarity::default().is_abstain());
    }
}
