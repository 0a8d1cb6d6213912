mod loader;
mod models;

pub use loader::ProjectSet;
pub use models::{Contributor, Project, Status, StatusVariant};
