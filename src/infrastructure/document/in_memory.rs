//! In-memory document registry implementation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::document::{Document, DocumentId, DocumentRegistry};

/// Stable hex digest of document content.
///
/// This belongs to the store side of the boundary: the registry supplies
/// digests with its documents, the pipeline never recomputes them.
pub fn content_digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// In-memory implementation of DocumentRegistry
#[derive(Debug)]
pub struct InMemoryDocumentRegistry {
    documents: Arc<RwLock<HashMap<String, Document>>>,
}

impl InMemoryDocumentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a registry pre-populated with documents
    pub fn with_documents(documents: Vec<Document>) -> Self {
        let map = documents
            .into_iter()
            .map(|doc| (doc.id().as_str().to_string(), doc))
            .collect();

        Self {
            documents: Arc::new(RwLock::new(map)),
        }
    }

    /// Inserts content under the given ID, computing its digest
    pub async fn insert(&self, id: DocumentId, content: impl Into<String>) -> Document {
        let content = content.into();
        let digest = content_digest(&content);
        let document = Document::new(id, content, digest);

        self.documents
            .write()
            .await
            .insert(document.id().as_str().to_string(), document.clone());

        document
    }

    /// Removes a document by ID
    pub async fn remove(&self, id: &DocumentId) -> bool {
        self.documents.write().await.remove(id.as_str()).is_some()
    }
}

impl Default for InMemoryDocumentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentRegistry for InMemoryDocumentRegistry {
    async fn list_all(&self) -> Result<Vec<Document>, DomainError> {
        let documents = self.documents.read().await;
        Ok(documents.values().cloned().collect())
    }

    async fn get_by_id(&self, id: &DocumentId) -> Result<Option<Document>, DomainError> {
        let documents = self.documents.read().await;
        Ok(documents.get(id.as_str()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let registry = InMemoryDocumentRegistry::new();
        let id = DocumentId::new("post-1").unwrap();

        let inserted = registry.insert(id.clone(), "# Hello").await;
        let fetched = registry.get_by_id(&id).await.unwrap();

        assert_eq!(fetched, Some(inserted));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let registry = InMemoryDocumentRegistry::new();
        let id = DocumentId::new("missing").unwrap();

        assert_eq!(registry.get_by_id(&id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_all() {
        let registry = InMemoryDocumentRegistry::new();
        registry
            .insert(DocumentId::new("a").unwrap(), "alpha")
            .await;
        registry.insert(DocumentId::new("b").unwrap(), "beta").await;

        let all = registry.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_digest_tracks_content() {
        let registry = InMemoryDocumentRegistry::new();
        let id = DocumentId::new("post").unwrap();

        let first = registry.insert(id.clone(), "version one").await;
        let second = registry.insert(id, "version two").await;

        assert_ne!(first.content_digest(), second.content_digest());
    }

    #[test]
    fn test_digest_is_stable() {
        assert_eq!(content_digest("same"), content_digest("same"));
        assert_ne!(content_digest("same"), content_digest("other"));
    }
}
