//! Pure queries over the course graph.
//!
//! Exclusion edges encode "cannot be taken with", not "comes before"; they
//! are never traversed when computing prerequisite chains, dependency maps,
//! or cycles. Every function here is linear in the size of the graph.

use models::course::Course;
use std::collections::{HashMap, HashSet};

/// The ids of every direct non-exclusion prerequisite of `course`
///
/// OR-grouped alternatives are all included; grouping by logic type is a
/// display concern and does not filter here.
pub fn prerequisites_of(course: &Course) -> HashSet<String> {
    course
        .prerequisites
        .iter()
        .filter(|edge| edge.is_dependency())
        .map(|edge| edge.target_course_id.clone())
        .collect()
}

/// Every course that directly requires `id` through a non-exclusion edge
///
/// Exclusion edges are not inverted into dependents.
pub fn dependents_of<'a>(courses: &'a [Course], id: &str) -> Vec<&'a Course> {
    courses
        .iter()
        .filter(|course| {
            course
                .prerequisites
                .iter()
                .any(|edge| edge.is_dependency() && edge.target_course_id == id)
        })
        .collect()
}

/// The courses newly unlocked by `selected_ids`
///
/// A course qualifies when it is not itself selected, has at least one
/// non-exclusion prerequisite edge, and every edge on it holds: dependency
/// edges need their target selected, exclusion edges need their target not
/// selected. Courses with zero prerequisites never qualify; they were always
/// available. Every edge is treated as mandatory regardless of logic type.
pub fn unlockable_given(courses: &[Course], selected_ids: &HashSet<String>) -> HashSet<String> {
    courses
        .iter()
        .filter(|course| !selected_ids.contains(&course.id))
        .filter(|course| course.has_dependency_prerequisites())
        .filter(|course| {
            course.prerequisites.iter().all(|edge| {
                if edge.is_exclusion {
                    !selected_ids.contains(&edge.target_course_id)
                } else {
                    selected_ids.contains(&edge.target_course_id)
                }
            })
        })
        .map(|course| course.id.clone())
        .collect()
}

/// DFS coloring state
#[derive(Clone, Copy, PartialEq)]
enum Color {
    Gray,
    Black,
}

/// Whether the non-exclusion subgraph contains a cycle
///
/// Well-formed catalog data is acyclic; this exists to reject malformed
/// input, not to support cyclic semantics. Standard white/gray/black DFS: a
/// back-edge to a gray node is a cycle, black subtrees are never revisited,
/// and disconnected components all get their own root visit.
pub fn has_cycle(courses: &[Course]) -> bool {
    let by_id: HashMap<&str, &Course> = courses
        .iter()
        .map(|course| (course.id.as_str(), course))
        .collect();
    let mut colors: HashMap<&str, Color> = HashMap::with_capacity(courses.len());

    courses
        .iter()
        .any(|course| visit(course, &by_id, &mut colors))
}

fn visit<'a>(
    course: &'a Course,
    by_id: &HashMap<&'a str, &'a Course>,
    colors: &mut HashMap<&'a str, Color>,
) -> bool {
    match colors.get(course.id.as_str()) {
        Some(Color::Black) => return false,
        Some(Color::Gray) => return true,
        None => {}
    }

    colors.insert(&course.id, Color::Gray);

    for edge in course.prerequisites.iter().filter(|e| e.is_dependency()) {
        let Some(target) = by_id.get(edge.target_course_id.as_str()) else {
            continue;
        };
        if visit(target, by_id, colors) {
            return true;
        }
    }

    colors.insert(&course.id, Color::Black);

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{
        course::{Course, PrerequisiteEdge},
        credits::Credits,
    };

    fn course(id: &str, level: i32, edges: Vec<PrerequisiteEdge>) -> Course {
        Course {
            id: id.to_string(),
            code: format!("COMP {level}"),
            title: String::new(),
            credits: Credits::DEFAULT,
            description: String::new(),
            level,
            department: "COMP".to_string(),
            prerequisites: edges,
        }
    }

    fn edge(source: &str, target: &str, is_exclusion: bool) -> PrerequisiteEdge {
        PrerequisiteEdge {
            source_course_id: source.to_string(),
            target_course_id: target.to_string(),
            is_corequisite: false,
            is_exclusion,
            logic_type: None,
        }
    }

    fn selected(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    /// The worked scenario: A (no prereqs), B requires A, C excludes A
    fn abc() -> Vec<Course> {
        vec![
            course("a", 1000, Vec::new()),
            course("b", 2000, vec![edge("b", "a", false)]),
            course("c", 2000, vec![edge("c", "a", true)]),
        ]
    }

    #[test]
    fn test_prerequisites_exclude_exclusions() {
        let courses = abc();

        assert_eq!(prerequisites_of(&courses[1]), selected(&["a"]));
        assert!(prerequisites_of(&courses[2]).is_empty());
        assert!(prerequisites_of(&courses[0]).is_empty());
    }

    #[test]
    fn test_dependents_ignore_exclusions() {
        let courses = abc();
        let dependents = dependents_of(&courses, "a");

        // C's edge to A is an exclusion; only B depends on A
        assert_eq!(dependents.len(), 1);
        assert_eq!(dependents[0].id, "b");
    }

    #[test]
    fn test_unlockable_scenario() {
        let courses = abc();

        // C has zero non-exclusion prerequisites, so it is never unlockable
        assert_eq!(
            unlockable_given(&courses, &selected(&["a"])),
            selected(&["b"])
        );
    }

    #[test]
    fn test_unlockable_never_contains_prereq_free_courses() {
        let courses = abc();

        for ids in [selected(&[]), selected(&["a"]), selected(&["a", "b", "c"])] {
            assert!(!unlockable_given(&courses, &ids).contains("a"));
        }
    }

    #[test]
    fn test_unlockable_requires_every_edge() {
        // D requires both A and B; selecting only A is not enough
        let mut courses = abc();
        courses.push(course(
            "d",
            3000,
            vec![edge("d", "a", false), edge("d", "b", false)],
        ));

        assert!(!unlockable_given(&courses, &selected(&["a"])).contains("d"));
        assert!(unlockable_given(&courses, &selected(&["a", "b"])).contains("d"));
    }

    #[test]
    fn test_unlockable_blocked_by_selected_exclusion() {
        // E requires A but is mutually exclusive with B
        let mut courses = abc();
        courses.push(course(
            "e",
            2000,
            vec![edge("e", "a", false), edge("e", "b", true)],
        ));

        assert!(unlockable_given(&courses, &selected(&["a"])).contains("e"));
        assert!(!unlockable_given(&courses, &selected(&["a", "b"])).contains("e"));
    }

    #[test]
    fn test_unlockable_excludes_selected_courses() {
        let courses = abc();

        assert!(!unlockable_given(&courses, &selected(&["a", "b"])).contains("b"));
    }

    #[test]
    fn test_acyclic_graph_has_no_cycle() {
        assert!(!has_cycle(&abc()));
        assert!(!has_cycle(&[]));
    }

    #[test]
    fn test_detects_cycle() {
        let courses = vec![
            course("a", 1000, vec![edge("a", "b", false)]),
            course("b", 2000, vec![edge("b", "a", false)]),
        ];

        assert!(has_cycle(&courses));
    }

    #[test]
    fn test_exclusion_cycle_is_not_a_cycle() {
        // Mutual exclusions are legitimate and not dependency cycles
        let courses = vec![
            course("a", 1000, vec![edge("a", "b", true)]),
            course("b", 1000, vec![edge("b", "a", true)]),
        ];

        assert!(!has_cycle(&courses));
    }

    #[test]
    fn test_cycle_in_disconnected_component() {
        let mut courses = abc();
        courses.push(course("x", 3000, vec![edge("x", "y", false)]));
        courses.push(course("y", 3000, vec![edge("y", "x", false)]));

        assert!(has_cycle(&courses));
    }

    #[test]
    fn test_shared_subtree_visited_once() {
        // Diamond: d -> b -> a, d -> c -> a; no cycle despite the shared node
        let courses = vec![
            course("a", 1000, Vec::new()),
            course("b", 2000, vec![edge("b", "a", false)]),
            course("c", 2000, vec![edge("c", "a", false)]),
            course("d", 3000, vec![edge("d", "b", false), edge("d", "c", false)]),
        ];

        assert!(!has_cycle(&courses));
    }
}
