//! Domain layer - Core entities, traits, and errors

pub mod artifact;
pub mod cache;
pub mod document;
pub mod error;
pub mod plugin;
pub mod tree;

pub use artifact::{Heading, WordCount};
pub use cache::{ArtifactKeyDeriver, ArtifactKind, Cache, CacheExt};
pub use document::{Document, DocumentId, DocumentRegistry};
pub use error::DomainError;
pub use plugin::{
    MarkdownPlugin, MutationContext, ParserExtension, PluginRegistry, SourceMutator,
    TransformContext, TreeTransformer,
};
pub use tree::{CellAlignment, MarkdownNode};
