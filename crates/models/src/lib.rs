pub mod course;
pub mod credits;
pub mod raw;
