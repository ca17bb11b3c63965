pub mod builder;
pub mod catalog;
pub mod layout;
pub mod normalize;
pub mod prereq_text;
pub mod query;
pub mod selection;

pub use catalog::Catalog;
pub use selection::Selection;
