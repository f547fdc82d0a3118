//! Project query handlers.

mod find_project;

pub use find_project::{FindProjectHandler, FindProjectQuery};
