//! Cleanup for scraped catalog text.
//!
//! The source calendar pages carry a mix of non-breaking spaces, zero-width
//! characters, and run-together section blocks. Everything here is pure and
//! best-effort: bad input produces a cleaned string, never an error.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Non-breaking and invisible space variants that should render as an
    /// ordinary space: U+00A0, U+00AD, U+2000..U+200F, U+2028, U+2029, U+FEFF
    static ref INVISIBLE_SPACE: Regex =
        Regex::new(r"[\x{00A0}\x{00AD}\x{2000}-\x{200F}\x{2028}\x{2029}\x{FEFF}]").unwrap();
    /// Known mis-encoding in the source pages: a stray "A" glued to an
    /// invisible space where a plain space belongs
    static ref MISENCODED_A: Regex =
        Regex::new(r"A[\x{00A0}\x{00AD}\x{2000}-\x{200F}\x{2028}\x{2029}\x{FEFF}]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    /// Horizontal whitespace only, so newlines survive
    static ref INTRA_LINE_WHITESPACE: Regex = Regex::new(r"[^\S\n]+").unwrap();
    /// Section blocks that the calendar runs together on one line.
    /// "Lectures" must come before "Lecture" in the alternation.
    static ref SECTION_MARKER: Regex = Regex::new(
        r"([^\n])[ \t]*(Also listed as|Precludes|Prerequisite\(s\):|Lectures|Lecture)",
    )
    .unwrap();
    static ref EXCESS_NEWLINES: Regex = Regex::new(r"\n{3,}").unwrap();
    static ref TRAILING_LINE_SPACE: Regex = Regex::new(r"[ \t]+\n").unwrap();
    /// Discontinued-course sentences, anchored to the start of the
    /// description so that mentions of *other* retired courses do not match
    static ref NO_LONGER_OFFERED: Regex = Regex::new(
        r"(?i)^\s*(?:this course is no longer offered|this course has been (?:discontinued|retired)|no longer offered)",
    )
    .unwrap();
}

/// Marker appended to the titles of retired courses
const NO_LONGER_OFFERED_TITLE: &str = "(no longer offered)";

/// How far into the description a discontinued-course sentence may start
const NO_LONGER_OFFERED_WINDOW: usize = 200;

/// Cleans a raw course title: invisible-space repair, whitespace collapse,
/// trim
pub fn clean_title(raw: &str) -> String {
    let title = INVISIBLE_SPACE.replace_all(raw, " ");
    let title = WHITESPACE.replace_all(&title, " ");

    title.trim().to_string()
}

/// Cleans a raw course description
///
/// Repairs the same invisible-space variants as [`clean_title`] plus the
/// stray-"A" mis-encoding, drops a leading echo of the course's own code,
/// collapses horizontal whitespace while preserving newlines, and breaks the
/// run-together section blocks ("Precludes", "Prerequisite(s):", ...) onto
/// their own lines.
pub fn clean_description(raw: &str, course_code: &str) -> String {
    let description = MISENCODED_A.replace_all(raw, " ");
    let description = INVISIBLE_SPACE.replace_all(&description, " ");

    // The calendar repeats the course code at the top of the description
    let mut description = description.trim_start().to_string();
    if !course_code.is_empty() {
        if let Some(rest) = description.strip_prefix(course_code) {
            description = rest.trim_start().to_string();
        }
    }

    let description = INTRA_LINE_WHITESPACE.replace_all(&description, " ");
    let description = SECTION_MARKER.replace_all(&description, "$1\n$2");
    let description = EXCESS_NEWLINES.replace_all(&description, "\n\n");
    let description = TRAILING_LINE_SPACE.replace_all(&description, "\n");

    description.trim().to_string()
}

/// Whether a course is flagged as retired, either by the title marker or by
/// a discontinued-course sentence near the start of the description
///
/// A description that merely mentions some other course being discontinued
/// ("This course replaces COMP 999 which is no longer offered.") does not
/// match: the sentence must anchor at the description's start.
pub fn is_no_longer_offered(title: &str, description: &str) -> bool {
    if title.to_lowercase().contains(NO_LONGER_OFFERED_TITLE) {
        return true;
    }

    let window: String = description.chars().take(NO_LONGER_OFFERED_WINDOW).collect();

    NO_LONGER_OFFERED.is_match(&window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title_invisible_spaces() {
        assert_eq!(
            clean_title("Introduction\u{00A0}to \u{200B}Computing"),
            "Introduction to Computing"
        );
        assert_eq!(clean_title("  Data   Structures  "), "Data Structures");
        assert_eq!(clean_title(""), "");
    }

    #[test]
    fn test_clean_description_misencoded_a() {
        // The stray "A" fused to a non-breaking space becomes one space
        assert_eq!(
            clean_description("Intro to systems.A\u{00A0}Topics vary.", "COMP 2401"),
            "Intro to systems. Topics vary."
        );
    }

    #[test]
    fn test_clean_description_strips_leading_code_echo() {
        assert_eq!(
            clean_description("COMP 1001 An introduction to programming.", "COMP 1001"),
            "An introduction to programming."
        );
    }

    #[test]
    fn test_clean_description_breaks_section_markers() {
        let cleaned = clean_description(
            "Covers recursion and lists. Precludes additional credit for COMP 1005. Lectures three hours a week.",
            "COMP 1406",
        );

        assert_eq!(
            cleaned,
            "Covers recursion and lists.\nPrecludes additional credit for COMP 1005.\nLectures three hours a week."
        );
    }

    #[test]
    fn test_clean_description_preserves_existing_breaks() {
        let cleaned = clean_description("First part.\nPrecludes COMP 1005.", "COMP 1406");

        // Already at line start, no extra newline inserted
        assert_eq!(cleaned, "First part.\nPrecludes COMP 1005.");
    }

    #[test]
    fn test_clean_description_collapses_blank_lines() {
        assert_eq!(
            clean_description("First.\n\n\n\nSecond.", "COMP 1001"),
            "First.\n\nSecond."
        );
    }

    #[test]
    fn test_no_longer_offered_title_marker() {
        assert!(is_no_longer_offered("COMP 9999 (No Longer Offered)", ""));
        assert!(!is_no_longer_offered("COMP 1000", ""));
    }

    #[test]
    fn test_no_longer_offered_description_anchoring() {
        assert!(is_no_longer_offered(
            "COMP 2003",
            "This course is no longer offered. See COMP 2401 instead."
        ));
        assert!(is_no_longer_offered("COMP 2003", "No longer offered."));

        // A mention of another retired course must not match
        assert!(!is_no_longer_offered(
            "COMP 1000",
            "This course replaces COMP 999 which is no longer offered."
        ));

        // The sentence has to start inside the first 200 characters
        let padded = format!("{} This course is no longer offered.", "x".repeat(250));
        assert!(!is_no_longer_offered("COMP 1000", &padded));
    }
}
