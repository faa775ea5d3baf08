//! Plugin contract types
//!
//! A plugin declares its capabilities through typed accessors instead of
//! being probed at call time: it may contribute grammar extensions to the
//! shared parser, mutate a document's source before parsing, and/or
//! transform the parsed tree before it is frozen. Plugin options are plain
//! constructor state on the plugin value; no untyped options bag travels
//! through the pipeline.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::domain::DomainError;
use crate::domain::document::{Document, DocumentRegistry};
use crate::domain::tree::MarkdownNode;

/// A grammar extension a plugin contributes to the shared parser
/// configuration.
///
/// Extensions are applied once per plugin-set activation, in registration
/// order, before any document is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserExtension {
    Tables,
    Strikethrough,
    TaskLists,
    SmartPunctuation,
    HeadingAttributes,
}

/// Context handed to source mutators.
///
/// The working copy of the content sits behind a mutex because all capable
/// plugins run concurrently during the mutation phase; edits are assumed
/// commutative.
pub struct MutationContext<'a> {
    /// The document being processed (original, pre-mutation content)
    pub document: &'a Document,
    /// Working copy of the content, edited in place by mutators
    pub content: &'a Mutex<String>,
    /// Snapshot of every document in the registry
    pub documents: &'a [Document],
    /// Live registry handle for point lookups
    pub registry: &'a dyn DocumentRegistry,
}

/// Context handed to tree transformers
pub struct TransformContext<'a> {
    /// The document being processed
    pub document: &'a Document,
    /// Snapshot of every document in the registry
    pub documents: &'a [Document],
    /// Live registry handle for point lookups
    pub registry: &'a dyn DocumentRegistry,
}

/// Source-mutation capability: edits raw document content before parsing
#[async_trait]
pub trait SourceMutator: Send + Sync {
    async fn mutate_source(&self, ctx: &MutationContext<'_>) -> Result<(), DomainError>;
}

/// Tree-transform capability: edits the parsed tree before it is frozen.
///
/// Transformers run strictly sequentially in registration order; each sees
/// the tree as left by its predecessor.
#[async_trait]
pub trait TreeTransformer: Send + Sync {
    async fn transform(
        &self,
        tree: &mut MarkdownNode,
        ctx: &TransformContext<'_>,
    ) -> Result<(), DomainError>;
}

/// A registered markdown plugin.
///
/// Implementations opt into capabilities by overriding the corresponding
/// accessor; the defaults declare none.
pub trait MarkdownPlugin: Send + Sync + Debug {
    /// Stable plugin name; part of the plugin-set fingerprint
    fn name(&self) -> &str;

    /// Grammar extensions this plugin contributes to the shared parser
    fn parser_extensions(&self) -> Vec<ParserExtension> {
        Vec::new()
    }

    /// Source-mutation capability, if any
    fn source_mutator(&self) -> Option<&dyn SourceMutator> {
        None
    }

    /// Tree-transform capability, if any
    fn tree_transformer(&self) -> Option<&dyn TreeTransformer> {
        None
    }
}
