//! Cached canonical-tree construction

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::DomainError;
use crate::domain::cache::{ArtifactKeyDeriver, ArtifactKind, Cache, CacheExt};
use crate::domain::document::{Document, DocumentRegistry};
use crate::domain::tree::MarkdownNode;

use super::parser::reclassify_code_blocks;
use super::pipeline::PluginPipeline;

/// Builds the canonical tree for a document, cached by (content digest,
/// plugin-set fingerprint).
///
/// A cache hit returns the stored tree unchanged; there is no re-validation
/// against current plugin code, invalidation rests entirely on the
/// fingerprints. The returned tree is frozen: derivers share it read-only.
#[derive(Debug)]
pub struct TreeBuilder {
    pipeline: Arc<PluginPipeline>,
    cache: Arc<dyn Cache>,
    registry: Arc<dyn DocumentRegistry>,
    keys: ArtifactKeyDeriver,
    cache_ttl: Duration,
}

impl TreeBuilder {
    pub fn new(
        pipeline: Arc<PluginPipeline>,
        cache: Arc<dyn Cache>,
        registry: Arc<dyn DocumentRegistry>,
        keys: ArtifactKeyDeriver,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            pipeline,
            cache,
            registry,
            keys,
            cache_ttl,
        }
    }

    /// Builds (or fetches) the frozen canonical tree for a document
    pub async fn build(&self, document: &Document) -> Result<Arc<MarkdownNode>, DomainError> {
        let key = self.keys.derive(
            ArtifactKind::Ast,
            document.content_digest(),
            self.pipeline.fingerprint(),
        );

        if let Some(tree) = self.cache.get_best_effort::<MarkdownNode>(&key).await {
            debug!(document = %document.id(), "canonical tree cache hit");
            return Ok(Arc::new(tree));
        }

        debug!(document = %document.id(), "canonical tree cache miss, building");

        let documents = self.registry.list_all().await?;
        let content = self
            .pipeline
            .run_source_mutation(document, &documents, &*self.registry)
            .await?;

        let mut tree = self.pipeline.parse(&content)?;
        reclassify_code_blocks(&mut tree);

        self.pipeline
            .run_tree_transform(&mut tree, document, &documents, &*self.registry)
            .await?;

        // Failures above are never cached; only a completed tree is stored
        self.cache.set_best_effort(&key, &tree, self.cache_ttl).await;

        Ok(Arc::new(tree))
    }
}
