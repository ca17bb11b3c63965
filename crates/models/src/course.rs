use crate::credits::Credits;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Course levels at or above this value are graduate-level and excluded
/// from the undergraduate catalog graph
pub const GRADUATE_LEVEL: i32 = 5000;

/// How sibling prerequisite rows combine for display grouping
///
/// Stored verbatim in the `logic_type` column. Does not change graph
/// reachability: `OR` siblings are mutually-alternative routes, but every
/// non-exclusion edge is still a dependency edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicType {
    And,
    Or,
    OneOf,
    AllOf,
}

/// A directed requirement or exclusion relation between two courses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrerequisiteEdge {
    /// The course that requires (or excludes)
    pub source_course_id: String,
    /// The prerequisite or excluded course
    pub target_course_id: String,
    /// Must be taken concurrently rather than strictly before
    pub is_corequisite: bool,
    /// Mutually exclusive with the source; never a dependency edge
    pub is_exclusion: bool,
    pub logic_type: Option<LogicType>,
}

impl PrerequisiteEdge {
    /// Whether this edge participates in prerequisite chains, dependency
    /// maps, and cycle detection
    pub fn is_dependency(&self) -> bool {
        !self.is_exclusion
    }
}

/// A catalog entry with its outgoing prerequisite edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Opaque unique id, as issued by the data provider
    pub id: String,
    /// Human course code, e.g. "COMP 1001"
    pub code: String,
    pub title: String,
    pub credits: Credits,
    pub description: String,
    /// Multiple of 1000; 1000 is first year, 4000 is fourth year
    pub level: i32,
    pub department: String,
    pub prerequisites: Vec<PrerequisiteEdge>,
}

impl Course {
    pub fn year_band(&self) -> YearBand {
        YearBand::from_level(self.level)
    }

    /// Whether the course has at least one non-exclusion prerequisite edge
    pub fn has_dependency_prerequisites(&self) -> bool {
        self.prerequisites.iter().any(PrerequisiteEdge::is_dependency)
    }
}

impl Display for Course {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.code, self.title)
    }
}

/// The academic year a course belongs to, derived from its level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, EnumIter)]
pub enum YearBand {
    First,
    Second,
    Third,
    Fourth,
}

impl YearBand {
    /// Maps a course level to its year band, clamping out-of-range
    /// undergraduate levels into the first/fourth year
    pub fn from_level(level: i32) -> Self {
        match level / 1000 {
            i32::MIN..=1 => Self::First,
            2 => Self::Second,
            3 => Self::Third,
            _ => Self::Fourth,
        }
    }

    /// Zero-based band index, used by the layout engine for the year axis
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
            Self::Fourth => 3,
        }
    }
}

impl Display for YearBand {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            Self::First => "First Year",
            Self::Second => "Second Year",
            Self::Third => "Third Year",
            Self::Fourth => "Fourth Year",
        };

        write!(f, "{label}")
    }
}
