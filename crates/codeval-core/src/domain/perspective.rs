//! The fixed set of evaluation perspectives.

use serde::{Deserialize, Serialize};

/// One of the three angles a submission is evaluated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    TimeComplexity,
    SpaceComplexity,
    Readability,
}

impl Perspective {
    /// Every perspective, in report order.
    pub const ALL: [Perspective; 3] = [
        Perspective::TimeComplexity,
        Perspective::SpaceComplexity,
        Perspective::Readability,
    ];

    /// Human-readable title used in rendered reports.
    pub fn title(self) -> &'static str {
        match self {
            Perspective::TimeComplexity => "Time Complexity",
            Perspective::SpaceComplexity => "Space Complexity",
            Perspective::Readability => "Readability",
        }
    }

    /// Position within [`Perspective::ALL`].
    pub fn index(self) -> usize {
        match self {
            Perspective::TimeComplexity => 0,
            Perspective::SpaceComplexity => 1,
            Perspective::Readability => 2,
        }
    }
}

impl std::fmt::Display for Perspective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Perspective::TimeComplexity => "time_complexity",
            Perspective::SpaceComplexity => "space_complexity",
            Perspective::Readability => "readability",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Perspective {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "time" | "time_complexity" => Ok(Perspective::TimeComplexity),
            "space" | "space_complexity" => Ok(Perspective::SpaceComplexity),
            "readability" => Ok(Perspective::Readability),
            other => Err(format!(
                "unknown perspective '{other}' (expected time, space or readability)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_ordered_by_index() {
        for (i, perspective) in Perspective::ALL.iter().enumerate() {
            assert_eq!(perspective.index(), i);
        }
    }

    #[test]
    fn test_display_matches_serde() {
        for perspective in Perspective::ALL {
            let json = serde_json::to_string(&perspective).unwrap();
            assert_eq!(json, format!("\"{perspective}\""));
        }
    }

    #[test]
    fn test_from_str_accepts_short_and_long_names() {
        assert_eq!("time".parse(), Ok(Perspective::TimeComplexity));
        assert_eq!("space-complexity".parse(), Ok(Perspective::SpaceComplexity));
        assert_eq!("Readability".parse(), Ok(Perspective::Readability));
        assert!("security".parse::<Perspective>().is_err());
    }
}
