//! Type-safe enumerations for topic metadata.
//!
//! Difficulty levels are stored as strings in catalog sources and in
//! persisted selection state; these enums give them compile-time shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty level of a topic.
///
/// Topics without an explicit difficulty are treated as [`Difficulty::Beginner`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// All levels in ascending order.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Returns the lowercase key used in catalog sources.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    /// Display label for badges.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    /// Parse a difficulty string (case-insensitive, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();

        match normalized.as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(format!("Unknown difficulty: {s}")),
        }
    }
}

/// Difficulty filter applied to a topic list.
///
/// `All` disables the difficulty stage of filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyFilter {
    #[default]
    All,
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyFilter {
    /// Every accepted filter value, `All` first.
    pub const ALL: [Self; 4] = [
        Self::All,
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
    ];

    /// Returns the level this filter restricts to, or `None` for `All`.
    pub fn level(&self) -> Option<Difficulty> {
        match self {
            DifficultyFilter::All => None,
            DifficultyFilter::Beginner => Some(Difficulty::Beginner),
            DifficultyFilter::Intermediate => Some(Difficulty::Intermediate),
            DifficultyFilter::Advanced => Some(Difficulty::Advanced),
        }
    }

    /// Returns true if a topic of the given difficulty passes this filter.
    pub fn matches(&self, difficulty: Difficulty) -> bool {
        self.level().is_none_or(|level| level == difficulty)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyFilter::All => "all",
            DifficultyFilter::Beginner => "beginner",
            DifficultyFilter::Intermediate => "intermediate",
            DifficultyFilter::Advanced => "advanced",
        }
    }
}

impl From<Difficulty> for DifficultyFilter {
    fn from(level: Difficulty) -> Self {
        match level {
            Difficulty::Beginner => DifficultyFilter::Beginner,
            Difficulty::Intermediate => DifficultyFilter::Intermediate,
            Difficulty::Advanced => DifficultyFilter::Advanced,
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DifficultyFilter {
    type Err = String;

    /// Parse a filter value. Only `all` and the three levels are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();

        match normalized.as_str() {
            "all" => Ok(DifficultyFilter::All),
            "beginner" => Ok(DifficultyFilter::Beginner),
            "intermediate" => Ok(DifficultyFilter::Intermediate),
            "advanced" => Ok(DifficultyFilter::Advanced),
            _ => Err(format!("Unknown difficulty filter: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(
            "Beginner".parse::<Difficulty>().unwrap(),
            Difficulty::Beginner
        );
        assert_eq!(
            " ADVANCED ".parse::<Difficulty>().unwrap(),
            Difficulty::Advanced
        );
        assert!("expert".parse::<Difficulty>().is_err());
        assert!("all".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!(
            "all".parse::<DifficultyFilter>().unwrap(),
            DifficultyFilter::All
        );
        assert_eq!(
            "Intermediate".parse::<DifficultyFilter>().unwrap(),
            DifficultyFilter::Intermediate
        );
        assert!("everything".parse::<DifficultyFilter>().is_err());
        assert!("".parse::<DifficultyFilter>().is_err());
    }

    #[test]
    fn test_filter_matches() {
        assert!(DifficultyFilter::All.matches(Difficulty::Advanced));
        assert!(DifficultyFilter::Advanced.matches(Difficulty::Advanced));
        assert!(!DifficultyFilter::Beginner.matches(Difficulty::Advanced));
    }

    #[test]
    fn test_default_difficulty_is_beginner() {
        assert_eq!(Difficulty::default(), Difficulty::Beginner);
        assert_eq!(DifficultyFilter::default(), DifficultyFilter::All);
    }
}
