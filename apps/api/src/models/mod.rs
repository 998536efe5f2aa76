pub mod document;
pub mod photo;

pub use document::{DocumentSpec, Project, ProjectMode, SectionKind};
pub use photo::Photo;
