//! Construction of the in-memory course graph from raw provider rows.
//!
//! Catalog data is scraped and inherently imperfect, so this stage is
//! tolerant by design: malformed rows are skipped and edges referencing
//! filtered-out courses are dropped, never surfaced as errors.

use crate::normalize::{clean_description, clean_title, is_no_longer_offered};
use lazy_static::lazy_static;
use models::{
    course::{Course, GRADUATE_LEVEL, PrerequisiteEdge},
    credits::Credits,
    raw::{RawCourse, RawEdge},
};
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// Trailing metadata blocks stripped by the fallback description
    /// extraction when normal cleaning ate too much of the text
    static ref TRAILING_METADATA: Regex = Regex::new(
        r"(?s)(?:Includes:|Also listed as|Precludes|Prerequisite\(s\):|Lectures?\b).*$",
    )
    .unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// A cleaned description shorter than this, built from a raw description
/// longer than [`SUBSTANTIAL_RAW_LEN`], triggers the fallback extraction
const IMPLAUSIBLY_SHORT_LEN: usize = 50;
const SUBSTANTIAL_RAW_LEN: usize = 100;

/// Builds the validated course graph from raw provider rows
///
/// Graduate-level (≥ 5000) and no-longer-offered courses are filtered out.
/// An edge is attached to its source course only when both endpoints survive
/// the filter; dangling edges are dropped silently. Output order follows map
/// iteration and is unspecified; consumers that need an order sort
/// explicitly.
pub fn build_course_graph(raw_courses: Vec<RawCourse>, mut raw_edges: Vec<RawEdge>) -> Vec<Course> {
    let mut by_id: HashMap<String, Course> = HashMap::with_capacity(raw_courses.len());

    for raw in raw_courses {
        let Some(course) = build_course(raw) else {
            continue;
        };

        // Course ids are unique across the snapshot; keep the first row
        by_id.entry(course.id.clone()).or_insert(course);
    }

    // The provider returns edges ascending by order_index with nulls last,
    // but re-sorting here keeps per-course prerequisite order correct even
    // for providers that don't
    raw_edges.sort_by(|a, b| {
        a.course_id
            .cmp(&b.course_id)
            .then(nulls_last(a.order_index).cmp(&nulls_last(b.order_index)))
    });

    for raw in raw_edges {
        if !by_id.contains_key(&raw.prerequisite_id) {
            continue;
        }
        let Some(course) = by_id.get_mut(&raw.course_id) else {
            continue;
        };

        course.prerequisites.push(PrerequisiteEdge {
            source_course_id: raw.course_id,
            target_course_id: raw.prerequisite_id,
            is_corequisite: raw.is_corequisite,
            is_exclusion: raw.is_exclusion,
            logic_type: raw.logic_type,
        });
    }

    by_id.into_values().collect()
}

/// Validates and cleans a single raw row; `None` means the row is skipped
fn build_course(raw: RawCourse) -> Option<Course> {
    if raw.id.trim().is_empty() || raw.code.trim().is_empty() {
        return None;
    }
    if raw.level >= GRADUATE_LEVEL {
        return None;
    }

    let title = clean_title(&raw.title);
    let description = clean_description(&raw.description, &raw.code);
    if is_no_longer_offered(&title, &description) {
        return None;
    }

    let description = salvage_description(description, &raw.description, &raw.code);
    let credits = Credits::new(raw.credits).unwrap_or(Credits::DEFAULT);

    Some(Course {
        id: raw.id,
        code: raw.code.trim().to_string(),
        title,
        credits,
        description,
        level: raw.level,
        department: raw.department.trim().to_uppercase(),
        prerequisites: Vec::new(),
    })
}

/// Falls back to a looser extraction when cleaning reduced a substantial raw
/// description to almost nothing
///
/// A non-empty raw description is never traded for an empty cleaned one.
fn salvage_description(cleaned: String, raw: &str, course_code: &str) -> String {
    let raw_len = raw.trim().chars().count();
    let suspicious = cleaned.chars().count() < IMPLAUSIBLY_SHORT_LEN
        && raw_len > SUBSTANTIAL_RAW_LEN;

    if suspicious {
        let repaired = clean_description(raw, course_code);
        let stripped = TRAILING_METADATA.replace(&repaired, "");
        let stripped = WHITESPACE.replace_all(stripped.trim(), " ").to_string();

        if stripped.chars().count() > cleaned.chars().count() {
            return stripped;
        }
    }

    if cleaned.is_empty() && raw_len > 0 {
        return WHITESPACE.replace_all(raw.trim(), " ").to_string();
    }

    cleaned
}

/// Sort key placing absent order indexes after every present one
fn nulls_last(index: Option<i32>) -> (bool, i32) {
    (index.is_none(), index.unwrap_or(0))
}
