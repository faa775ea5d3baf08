//! Artifact cache-key derivation

use std::fmt;

/// The kinds of derived artifacts held in the cache.
///
/// Every kind owns a distinct key namespace so that artifacts derived from
/// the same document can never collide with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// The canonical parsed tree
    Ast,
    /// Rendered HTML output
    RenderedOutput,
    /// Ordered heading list
    Headings,
    /// Rendered table of contents
    TableOfContents,
    /// Untruncated excerpt source text
    Excerpt,
    /// Raw-content word count
    WordCount,
    /// Estimated reading time in minutes
    TimeToRead,
}

impl ArtifactKind {
    /// All artifact kinds, in a stable order
    pub const ALL: [ArtifactKind; 7] = [
        ArtifactKind::Ast,
        ArtifactKind::RenderedOutput,
        ArtifactKind::Headings,
        ArtifactKind::TableOfContents,
        ArtifactKind::Excerpt,
        ArtifactKind::WordCount,
        ArtifactKind::TimeToRead,
    ];

    /// Namespace segment used in cache keys for this kind
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::Ast => "ast",
            Self::RenderedOutput => "html",
            Self::Headings => "headings",
            Self::TableOfContents => "toc",
            Self::Excerpt => "excerpt",
            Self::WordCount => "words",
            Self::TimeToRead => "time-to-read",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.namespace())
    }
}

/// Derives cache keys from (artifact kind, content digest, plugin-set
/// fingerprint). Pure and deterministic; no I/O, defined for all inputs.
#[derive(Debug, Clone)]
pub struct ArtifactKeyDeriver {
    prefix: String,
}

impl Default for ArtifactKeyDeriver {
    fn default() -> Self {
        Self {
            prefix: "md-artifacts".to_string(),
        }
    }
}

impl ArtifactKeyDeriver {
    /// Creates a deriver with the default key prefix
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the key prefix (useful when several pipelines share a store)
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Derives the cache key for one artifact of one document under one
    /// plugin set
    pub fn derive(
        &self,
        kind: ArtifactKind,
        content_digest: &str,
        plugin_fingerprint: &str,
    ) -> String {
        format!(
            "{}:{}:{}:{}",
            self.prefix,
            kind.namespace(),
            content_digest,
            plugin_fingerprint
        )
    }
}
