// Detector configuration enums: output convention and occurrence semantics.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Where a detector attaches its output symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    /// Output belongs to the destination state (state-output convention).
    #[default]
    Moore,
    /// Output belongs to the transition itself (transition-output convention).
    Mealy,
}

impl Convention {
    /// Lowercase name, as used in file names and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Convention::Moore => "moore",
            Convention::Mealy => "mealy",
        }
    }

    /// Capitalized name, as used in diagram titles.
    pub fn title(self) -> &'static str {
        match self {
            Convention::Moore => "Moore",
            Convention::Mealy => "Mealy",
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Convention {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "moore" | "state" => Ok(Convention::Moore),
            "mealy" | "transition" => Ok(Convention::Mealy),
            _ => Err(ParseEnumError {
                kind: "detector type",
                value: s.to_string(),
                expected: "moore or mealy",
            }),
        }
    }
}

/// What happens after a complete occurrence has been detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlap {
    /// Trailing symbols of a match may start the next one.
    #[default]
    Overlapping,
    /// Matching restarts from an empty history after every detection.
    NonOverlapping,
}

impl Overlap {
    #[inline]
    pub fn from_bool(overlapping: bool) -> Self {
        if overlapping {
            Overlap::Overlapping
        } else {
            Overlap::NonOverlapping
        }
    }

    #[inline]
    pub fn is_overlapping(self) -> bool {
        self == Overlap::Overlapping
    }

    /// Short form used in default file names.
    pub fn slug(self) -> &'static str {
        match self {
            Overlap::Overlapping => "overlap",
            Overlap::NonOverlapping => "nonoverlap",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Overlap::Overlapping => "Overlapping",
            Overlap::NonOverlapping => "Non-Overlapping",
        }
    }
}

impl fmt::Display for Overlap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Overlap {
    type Err = ParseEnumError;

    /// Accepts the yes/no answers of the interactive prompt as well as the
    /// long names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" | "overlap" | "overlapping" => Ok(Overlap::Overlapping),
            "n" | "no" | "nonoverlap" | "non-overlapping" | "nonoverlapping" => {
                Ok(Overlap::NonOverlapping)
            }
            _ => Err(ParseEnumError {
                kind: "overlap mode",
                value: s.to_string(),
                expected: "y or n",
            }),
        }
    }
}

/// Error for unrecognized [`Convention`] or [`Overlap`] names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?} (expected {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}
