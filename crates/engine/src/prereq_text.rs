//! Extraction of prerequisite records from calendar description text.
//!
//! The calendar does not publish prerequisites as structured data; they are
//! sentences like "Prerequisite(s): COMP 1005 or COMP 1405, and COMP 1805."
//! This module pulls the course codes out of that text in source order and
//! tags each one with AND/OR grouping, producing the rows the `prerequisites`
//! table is populated from.

use lazy_static::lazy_static;
use models::course::LogicType;
use regex::{Captures, Regex};

lazy_static! {
    /// The prerequisite section, up to the next section block
    static ref PREREQ_SECTION: Regex = Regex::new(
        r"(?is)prerequisite[s]?[()s]*[:\s]+(.+?)(?:Lectures|Corequisite|Exclusion|Includes:|Also listed as|$)",
    )
    .unwrap();
    /// Fallback when no section block follows: stop at the first period
    static ref PREREQ_SECTION_LOOSE: Regex =
        Regex::new(r"(?is)prerequisite[s]?[()s]*[:\s]+(.+?)(?:\.|$)").unwrap();
    /// "with a minimum grade of C-" style qualifiers
    static ref MINIMUM_GRADE: Regex =
        Regex::new(r"(?i)\s+with\s+a\s+minimum\s+grade\s+(?:of\s+)?[^,and)]+").unwrap();
    /// Any department-prefixed course code, e.g. "COMP 1405" or "SYSC2004"
    static ref COURSE_CODE: Regex = Regex::new(r"(?i)\b([A-Za-z]{2,4})\s*(\d{4})\b").unwrap();
    /// A bare 4-digit course number with its leading year digit
    static ref CODE_NUMBER: Regex = Regex::new(r"(\d)(\d{3})").unwrap();
    /// An un-parenthesized "X or Y" pair of codes
    static ref OR_CHAIN: Regex = Regex::new(
        r"(?i)[A-Za-z]{2,4}\s*\d{4}\s+or\s+[A-Za-z]{2,4}\s*\d{4}",
    )
    .unwrap();
    /// A parenthesized group containing an "or"
    static ref OR_GROUP: Regex = Regex::new(r"(?i)\(([^)]*\bor\b[^)]*)\)").unwrap();
    static ref DOUBLE_COMMA: Regex = Regex::new(r"\s*,\s*,").unwrap();
    static ref COMMA_BEFORE_PAREN: Regex = Regex::new(r"\s*,\s*\)").unwrap();
    static ref COMMA_AFTER_PAREN: Regex = Regex::new(r"\(\s*,").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// One prerequisite pulled out of description text, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPrerequisite {
    /// Normalized course code, e.g. "COMP 1005"
    pub code: String,
    /// AND for mandatory codes, OR for codes that are alternative routes
    pub logic: LogicType,
}

/// Normalizes a course code to "DEPT nnnn" form ("comp1001" → "COMP 1001")
///
/// Codes from other departments pass through uppercased and trimmed.
pub fn normalize_course_code(raw: &str, department: &str) -> String {
    if let Some(caps) = COURSE_CODE.captures(raw) {
        if caps[1].eq_ignore_ascii_case(department) {
            return format!("{} {}", department.to_uppercase(), &caps[2]);
        }
    }

    raw.trim().to_uppercase()
}

/// Extracts the year level from a course code: the leading digit of the
/// 4-digit number, times 1000. Defaults to 1000 when no number is present.
pub fn extract_level(code: &str) -> i32 {
    CODE_NUMBER
        .captures(code)
        .and_then(|caps| caps[1].parse::<i32>().ok())
        .map_or(1000, |digit| digit * 1000)
}

/// Parses the prerequisite codes of `department` out of description text
///
/// Codes are returned in source order, de-duplicated, each tagged AND or OR:
/// an un-parenthesized "X or Y" chain makes every code OR, a code inside a
/// multi-course parenthesized or-group is OR, and everything else is AND.
/// A code seen first as AND and again inside an or-group is upgraded to OR.
pub fn parse_prerequisites(text: &str, department: &str) -> Vec<ParsedPrerequisite> {
    if text.is_empty() {
        return Vec::new();
    }

    let Some(section) = prerequisite_section(text) else {
        return Vec::new();
    };

    let section = MINIMUM_GRADE.replace_all(&section, "");
    let section = section.trim().trim_end_matches('.').to_string();

    // Codes from other departments are not tracked; drop them before
    // grouping so they cannot join or split an or-group
    let section = COURSE_CODE.replace_all(&section, |caps: &Captures| {
        if caps[1].eq_ignore_ascii_case(department) {
            caps[0].to_string()
        } else {
            String::new()
        }
    });
    let section = DOUBLE_COMMA.replace_all(&section, ",");
    let section = COMMA_BEFORE_PAREN.replace_all(&section, ")");
    let section = COMMA_AFTER_PAREN.replace_all(&section, "(");
    let section = WHITESPACE.replace_all(&section, " ").to_string();

    let parsed = if OR_CHAIN.is_match(&section) && !OR_GROUP.is_match(&section) {
        // Simple alternative chain: "COMP 1005 or COMP 1405"
        COURSE_CODE
            .find_iter(&section)
            .map(|m| ParsedPrerequisite {
                code: normalize_course_code(m.as_str(), department),
                logic: LogicType::Or,
            })
            .collect()
    } else {
        parse_mixed_groups(&section, department)
    };

    dedupe_preserving_order(parsed)
}

/// Locates the prerequisite sentence within the full description
fn prerequisite_section(text: &str) -> Option<String> {
    PREREQ_SECTION
        .captures(text)
        .or_else(|| PREREQ_SECTION_LOOSE.captures(text))
        .map(|caps| caps[1].to_string())
}

/// Handles text mixing parenthesized or-groups with mandatory codes
fn parse_mixed_groups(section: &str, department: &str) -> Vec<ParsedPrerequisite> {
    // Spans of or-groups that contain more than one course code; a group
    // with a single code is not a real alternative
    let or_spans: Vec<(usize, usize)> = OR_GROUP
        .find_iter(section)
        .filter(|m| COURSE_CODE.find_iter(m.as_str()).count() > 1)
        .map(|m| (m.start(), m.end()))
        .collect();

    COURSE_CODE
        .find_iter(section)
        .map(|m| {
            let in_or_group = or_spans
                .iter()
                .any(|&(start, end)| start <= m.start() && m.start() < end);
            let logic = if in_or_group {
                LogicType::Or
            } else {
                LogicType::And
            };

            ParsedPrerequisite {
                code: normalize_course_code(m.as_str(), department),
                logic,
            }
        })
        .collect()
}

/// Keeps the first occurrence of each code, upgrading AND to OR when a later
/// occurrence sits in an or-group
fn dedupe_preserving_order(parsed: Vec<ParsedPrerequisite>) -> Vec<ParsedPrerequisite> {
    let mut unique: Vec<ParsedPrerequisite> = Vec::with_capacity(parsed.len());

    for prereq in parsed {
        match unique.iter().position(|p| p.code == prereq.code) {
            None => unique.push(prereq),
            Some(i) => {
                if unique[i].logic == LogicType::And && prereq.logic == LogicType::Or {
                    unique[i].logic = LogicType::Or;
                }
            }
        }
    }

    unique
}
