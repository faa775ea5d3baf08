//! Document domain - Source document identity and registry access

mod entity;
mod registry;

pub use entity::{Document, DocumentId};
pub use registry::DocumentRegistry;
