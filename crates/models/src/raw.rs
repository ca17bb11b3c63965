use crate::course::LogicType;
use serde::{Deserialize, Serialize};

/// A row of the `courses` table as delivered by the data provider,
/// before any cleaning or filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCourse {
    pub id: String,
    pub code: String,
    pub title: String,
    pub credits: f32,
    #[serde(default)]
    pub description: String,
    pub level: i32,
    pub department: String,
}

/// A row of the `prerequisites` table
///
/// `order_index`, when present, preserves the sequence the prerequisites
/// appeared in within the source text; the provider returns rows ascending
/// by it with nulls last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEdge {
    pub course_id: String,
    pub prerequisite_id: String,
    #[serde(default)]
    pub is_corequisite: bool,
    #[serde(default)]
    pub is_exclusion: bool,
    #[serde(default)]
    pub logic_type: Option<LogicType>,
    #[serde(default)]
    pub order_index: Option<i32>,
}
