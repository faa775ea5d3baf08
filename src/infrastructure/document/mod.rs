//! Document infrastructure - Reference registry implementation

mod in_memory;

pub use in_memory::{InMemoryDocumentRegistry, content_digest};
