//! Cache domain - Key derivation and the store abstraction

mod key;
mod repository;

pub use key::{ArtifactKeyDeriver, ArtifactKind};
pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
