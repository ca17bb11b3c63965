pub mod course;
pub mod prerequisite;
