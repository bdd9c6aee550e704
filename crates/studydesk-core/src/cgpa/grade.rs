//! Letter grades and credit weights.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Letter grade on the ten-point scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Grade {
    #[default]
    S,
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    /// All grades, best first.
    pub const ALL: [Grade; 7] = [
        Grade::S,
        Grade::A,
        Grade::B,
        Grade::C,
        Grade::D,
        Grade::E,
        Grade::F,
    ];

    /// Highest grade-point value on the scale.
    pub const MAX_POINTS: f64 = 10.0;

    /// Lowest passing grade-point value on the scale.
    pub const MIN_POINTS: f64 = 4.0;

    pub fn points(self) -> u32 {
        match self {
            Grade::S => 10,
            Grade::A => 9,
            Grade::B => 8,
            Grade::C => 7,
            Grade::D => 6,
            Grade::E => 5,
            Grade::F => 4,
        }
    }

    /// Nearest letter band for an average grade-point value.
    pub fn for_points(points: f64) -> Grade {
        if points >= 9.5 {
            Grade::S
        } else if points >= 8.5 {
            Grade::A
        } else if points >= 7.5 {
            Grade::B
        } else if points >= 6.5 {
            Grade::C
        } else if points >= 5.5 {
            Grade::D
        } else if points >= 4.5 {
            Grade::E
        } else {
            Grade::F
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grade::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "grade".to_string(),
                message: format!("'{s}' is not one of S, A, B, C, D, E, F"),
            })
    }
}

/// Credit weight of a subject. Only 2, 3 and 4 credit subjects exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Credits {
    Two,
    #[default]
    Three,
    Four,
}

impl Credits {
    pub const ALL: [Credits; 3] = [Credits::Two, Credits::Three, Credits::Four];

    pub fn value(self) -> u32 {
        match self {
            Credits::Two => 2,
            Credits::Three => 3,
            Credits::Four => 4,
        }
    }
}

impl TryFrom<u8> for Credits {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Credits::Two),
            3 => Ok(Credits::Three),
            4 => Ok(Credits::Four),
            other => Err(ValidationError::InvalidValue {
                field: "credits".to_string(),
                message: format!("{other} is not one of 2, 3, 4"),
            }),
        }
    }
}

impl From<Credits> for u8 {
    fn from(c: Credits) -> Self {
        c.value() as u8
    }
}

impl FromStr for Credits {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s.trim().parse().map_err(|_| ValidationError::InvalidValue {
            field: "credits".to_string(),
            message: format!("'{s}' is not a number"),
        })?;
        Credits::try_from(n)
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_point_table() {
        let points: Vec<u32> = Grade::ALL.iter().map(|g| g.points()).collect();
        assert_eq!(points, vec![10, 9, 8, 7, 6, 5, 4]);
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(Grade::for_points(10.0), Grade::S);
        assert_eq!(Grade::for_points(9.5), Grade::S);
        assert_eq!(Grade::for_points(9.49), Grade::A);
        assert_eq!(Grade::for_points(8.5), Grade::A);
        assert_eq!(Grade::for_points(7.5), Grade::B);
        assert_eq!(Grade::for_points(6.5), Grade::C);
        assert_eq!(Grade::for_points(5.5), Grade::D);
        assert_eq!(Grade::for_points(4.5), Grade::E);
        assert_eq!(Grade::for_points(4.49), Grade::F);
    }

    #[test]
    fn grade_parses_case_insensitively() {
        assert_eq!("b".parse::<Grade>().unwrap(), Grade::B);
        assert_eq!(" S ".parse::<Grade>().unwrap(), Grade::S);
        assert!("G".parse::<Grade>().is_err());
    }

    #[test]
    fn grade_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Grade::C).unwrap(), "\"C\"");
        assert!(serde_json::from_str::<Grade>("\"Q\"").is_err());
    }

    #[test]
    fn credits_serialize_as_numbers() {
        assert_eq!(serde_json::to_string(&Credits::Four).unwrap(), "4");
        assert_eq!(serde_json::from_str::<Credits>("2").unwrap(), Credits::Two);
        assert!(serde_json::from_str::<Credits>("5").is_err());
    }

    #[test]
    fn credits_parse_from_text() {
        assert_eq!("3".parse::<Credits>().unwrap(), Credits::Three);
        assert!("1".parse::<Credits>().is_err());
        assert!("three".parse::<Credits>().is_err());
    }
}
