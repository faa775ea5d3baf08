//! Cache infrastructure - Reference store implementation

mod in_memory;

pub use in_memory::{InMemoryCache, InMemoryCacheConfig};
