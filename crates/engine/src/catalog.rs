//! Immutable snapshot of the loaded course graph.

use crate::builder::build_course_graph;
use models::{
    course::Course,
    raw::{RawCourse, RawEdge},
};
use std::collections::HashMap;

/// A single coherent snapshot of the course graph
///
/// A catalog is built once per data load and never mutated; refreshing the
/// data replaces the whole value, so readers never observe a half-updated
/// graph. [`Catalog::empty`] is the valid "no data yet" pre-state: every
/// query over it behaves as a trivial graph rather than an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// The pre-load state: a valid, empty graph
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps an already-built course set with an id index
    pub fn new(courses: Vec<Course>) -> Self {
        let index = courses
            .iter()
            .enumerate()
            .map(|(i, course)| (course.id.clone(), i))
            .collect();

        Self { courses, index }
    }

    /// Builds a fresh snapshot from raw provider rows
    pub fn from_rows(raw_courses: Vec<RawCourse>, raw_edges: Vec<RawEdge>) -> Self {
        Self::new(build_course_graph(raw_courses, raw_edges))
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.index.get(id).map(|&i| &self.courses[i])
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
