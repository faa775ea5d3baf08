//! Markdown document entity

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Opaque document identifier, assigned by the owning registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a document ID from an externally supplied value
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if id.trim().is_empty() {
            return Err(DomainError::validation("Document ID must not be empty"));
        }

        Ok(Self(id))
    }

    /// Generate a random document ID
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A markdown source document.
///
/// The content digest is supplied by the store that owns the document; the
/// pipeline treats it as given and never recomputes it from the content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    content: String,
    content_digest: String,
}

impl Document {
    /// Create a new document from registry-supplied parts
    pub fn new(
        id: DocumentId,
        content: impl Into<String>,
        content_digest: impl Into<String>,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            content_digest: content_digest.into(),
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_digest(&self) -> &str {
        &self.content_digest
    }
}
