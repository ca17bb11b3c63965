//! Deterministic 2-D placement of the course graph.
//!
//! Courses are laid out in horizontal year bands (first year at the top),
//! with each course placed along the cross axis near the mean position of
//! its earlier-year prerequisites so dependency chains line up visually.
//! The placement is a greedy, reproducible heuristic, not an optimal
//! layout: identical inputs always produce identical coordinates.
//!
//! Positions are layout hints. Edges carry abstract anchors only; the
//! renderer resolves actual pixel geometry.

use crate::selection::Selection;
use models::course::Course;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Cross-axis distance between adjacent nodes
pub const NODE_SPACING: f32 = 180.0;
/// Placement works on a half-spacing grid so a node can sit centered
/// between two prerequisites
const HALF_SPACING: f32 = NODE_SPACING / 2.0;
/// Vertical distance between year bands
pub const BAND_SPACING: f32 = 220.0;
/// Safety limit on collision probes before falling back to the cursor;
/// placement degrades to the next free slot, never loops
const MAX_PLACEMENT_PROBES: usize = 64;

/// A computed node position, in abstract layout units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Where on a node's bounding box an edge attaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopCenter,
    BottomCenter,
}

/// A render-ready course node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub course_id: String,
    pub code: String,
    pub year_band: usize,
    pub position: Point,
    pub is_selected: bool,
    pub is_prerequisite: bool,
    pub is_unlockable: bool,
    pub is_faded: bool,
}

/// Visual emphasis class of an edge, highest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeEmphasis {
    /// Edge out of the selected course to one of its prerequisites
    PrerequisiteOfSelected,
    /// Edge into a course the selection newly unlocks
    Unlockable,
    /// Touches the selection neighborhood without being either of the above
    Connected,
    Default,
}

impl EdgeEmphasis {
    /// The two highlighted classes animate; the rest are static
    pub fn is_animated(self) -> bool {
        matches!(self, Self::PrerequisiteOfSelected | Self::Unlockable)
    }
}

/// A render-ready edge between a course and one of its prerequisites
///
/// The connector runs from the prerequisite's bottom edge down to the
/// requiring course's top edge; corequisites keep their own color family
/// in every emphasis class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEdge {
    /// The requiring course
    pub source_course_id: String,
    /// The prerequisite
    pub target_course_id: String,
    pub is_corequisite: bool,
    pub emphasis: EdgeEmphasis,
    pub source_anchor: Anchor,
    pub target_anchor: Anchor,
}

/// Lays out every course and non-exclusion edge for rendering
///
/// `selected_ids`, `prerequisite_ids` and `unlockable_ids` are the current
/// highlight sets; `fade` is the fade predicate over course ids. The result
/// is deterministic for identical inputs.
pub fn layout<F>(
    courses: &[Course],
    selected_ids: &HashSet<String>,
    prerequisite_ids: &HashSet<String>,
    unlockable_ids: &HashSet<String>,
    fade: F,
) -> (Vec<LayoutNode>, Vec<LayoutEdge>)
where
    F: Fn(&str) -> bool,
{
    let by_id: HashMap<&str, &Course> = courses
        .iter()
        .map(|course| (course.id.as_str(), course))
        .collect();
    let bands = banded_order(courses, &by_id);
    let placements = place(&bands, &by_id);

    let mut nodes = Vec::with_capacity(courses.len());
    let mut edges = Vec::new();

    for (&band_index, band) in &bands {
        for course in band {
            let placement = &placements[course.id.as_str()];

            nodes.push(LayoutNode {
                course_id: course.id.clone(),
                code: course.code.clone(),
                year_band: band_index,
                position: Point {
                    x: placement.slot as f32 * HALF_SPACING,
                    y: band_index as f32 * BAND_SPACING,
                },
                is_selected: selected_ids.contains(&course.id),
                is_prerequisite: prerequisite_ids.contains(&course.id),
                is_unlockable: unlockable_ids.contains(&course.id),
                is_faded: fade(&course.id),
            });

            for edge in course.prerequisites.iter().filter(|e| e.is_dependency()) {
                if !by_id.contains_key(edge.target_course_id.as_str()) {
                    continue;
                }

                edges.push(LayoutEdge {
                    source_course_id: edge.source_course_id.clone(),
                    target_course_id: edge.target_course_id.clone(),
                    is_corequisite: edge.is_corequisite,
                    emphasis: classify(
                        &edge.source_course_id,
                        &edge.target_course_id,
                        selected_ids,
                        prerequisite_ids,
                        unlockable_ids,
                    ),
                    source_anchor: Anchor::TopCenter,
                    target_anchor: Anchor::BottomCenter,
                });
            }
        }
    }

    (nodes, edges)
}

/// Convenience wrapper deriving the highlight sets from a [`Selection`]
pub fn layout_selection(
    courses: &[Course],
    selection: &Selection,
) -> (Vec<LayoutNode>, Vec<LayoutEdge>) {
    layout(
        courses,
        &selection.selected_ids(),
        selection.prerequisite_ids(),
        selection.unlockable_ids(),
        |id| selection.is_faded(id),
    )
}

/// A node's resolved cross-axis grid slot
struct Placement {
    slot: i64,
}

/// Groups courses into year bands and fixes the within-band walk order:
/// `(department, code)` ascending, then courses with an earlier-year
/// prerequisite ahead of courses without one, stably, so dependency chains
/// cluster together
fn banded_order<'a>(
    courses: &'a [Course],
    by_id: &HashMap<&str, &Course>,
) -> BTreeMap<usize, Vec<&'a Course>> {
    let mut bands: BTreeMap<usize, Vec<&Course>> = BTreeMap::new();

    for course in courses {
        bands
            .entry(course.year_band().index())
            .or_default()
            .push(course);
    }

    for (&band_index, band) in bands.iter_mut() {
        band.sort_by(|a, b| {
            (a.department.as_str(), a.code.as_str()).cmp(&(b.department.as_str(), b.code.as_str()))
        });
        // false sorts before true: anchored courses lead
        band.sort_by_key(|course| !has_earlier_year_prerequisite(course, band_index, by_id));
    }

    bands
}

fn has_earlier_year_prerequisite(
    course: &Course,
    band_index: usize,
    by_id: &HashMap<&str, &Course>,
) -> bool {
    course
        .prerequisites
        .iter()
        .filter(|edge| edge.is_dependency())
        .filter_map(|edge| by_id.get(edge.target_course_id.as_str()))
        .any(|target| target.year_band().index() < band_index)
}

/// Walks the bands top to bottom assigning each course a grid slot
fn place<'a>(
    bands: &BTreeMap<usize, Vec<&'a Course>>,
    by_id: &HashMap<&str, &Course>,
) -> HashMap<&'a str, Placement> {
    let mut placements: HashMap<&str, Placement> = HashMap::new();

    for (&band_index, band) in bands {
        let mut used: HashSet<i64> = HashSet::new();
        let mut cursor: i64 = 0;

        for course in band {
            let preferred = preferred_slot(course, band_index, by_id, &placements);
            let slot = match preferred {
                Some(slot) => probe(slot, &used)
                    .unwrap_or_else(|| next_free_slot(&mut cursor, &used)),
                None => next_free_slot(&mut cursor, &used),
            };

            used.insert(slot);
            placements.insert(course.id.as_str(), Placement { slot });
        }
    }

    placements
}

/// The slot under the mean position of the course's already-placed
/// earlier-year prerequisites, snapped to the half-spacing grid
fn preferred_slot(
    course: &Course,
    band_index: usize,
    by_id: &HashMap<&str, &Course>,
    placements: &HashMap<&str, Placement>,
) -> Option<i64> {
    let mut sum: f32 = 0.0;
    let mut count: usize = 0;

    for edge in course.prerequisites.iter().filter(|e| e.is_dependency()) {
        let Some(target) = by_id.get(edge.target_course_id.as_str()) else {
            continue;
        };
        if target.year_band().index() >= band_index {
            continue;
        }
        if let Some(placement) = placements.get(edge.target_course_id.as_str()) {
            sum += placement.slot as f32;
            count += 1;
        }
    }

    (count > 0).then(|| (sum / count as f32).round() as i64)
}

/// Probes alternating offsets (0, +1, -1, +2, -2, ...) around the preferred
/// slot; gives up after [`MAX_PLACEMENT_PROBES`] attempts
fn probe(preferred: i64, used: &HashSet<i64>) -> Option<i64> {
    (0..MAX_PLACEMENT_PROBES)
        .map(|attempt| {
            let step = attempt.div_ceil(2) as i64;
            if attempt % 2 == 1 {
                preferred + step
            } else {
                preferred - step
            }
        })
        .find(|slot| !used.contains(slot))
}

/// The next free slot at or after the cursor; the cursor then skips a full
/// node spacing past it
fn next_free_slot(cursor: &mut i64, used: &HashSet<i64>) -> i64 {
    let mut slot = *cursor;
    while used.contains(&slot) {
        slot += 1;
    }
    *cursor = slot + 2;

    slot
}

/// Picks the single emphasis class of an edge. Precedence:
/// prerequisite-of-selected > unlockable > connected > default.
fn classify(
    source_id: &str,
    target_id: &str,
    selected_ids: &HashSet<String>,
    prerequisite_ids: &HashSet<String>,
    unlockable_ids: &HashSet<String>,
) -> EdgeEmphasis {
    if selected_ids.contains(source_id) {
        return EdgeEmphasis::PrerequisiteOfSelected;
    }
    if unlockable_ids.contains(source_id) {
        return EdgeEmphasis::Unlockable;
    }

    let touches = |id: &str| {
        selected_ids.contains(id) || prerequisite_ids.contains(id) || unlockable_ids.contains(id)
    };
    if touches(source_id) || touches(target_id) {
        return EdgeEmphasis::Connected;
    }

    EdgeEmphasis::Default
}
