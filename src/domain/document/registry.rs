//! Document registry trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use super::{Document, DocumentId};
use crate::domain::DomainError;

/// Read access to the external store that owns the source documents.
///
/// Source-mutation and tree-transform plugins receive this for
/// cross-document lookups (e.g. resolving links between documents).
#[async_trait]
pub trait DocumentRegistry: Send + Sync + Debug {
    /// Returns every document in the registry
    async fn list_all(&self) -> Result<Vec<Document>, DomainError>;

    /// Looks up a single document by its ID
    async fn get_by_id(&self, id: &DocumentId) -> Result<Option<Document>, DomainError>;
}
