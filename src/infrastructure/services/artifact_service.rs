//! Markdown artifact service
//!
//! The exposed artifact API. Every accessor follows the same path: look the
//! artifact up under its own cache key, on a miss derive it from the frozen
//! canonical tree (itself cache-checked), store best-effort, return. A
//! failed derivation propagates as a typed error and is never cached.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::domain::DomainError;
use crate::domain::artifact::{Heading, WordCount};
use crate::domain::cache::{ArtifactKeyDeriver, ArtifactKind, Cache, CacheExt};
use crate::domain::document::{Document, DocumentRegistry};
use crate::infrastructure::derive;
use crate::infrastructure::pipeline::{PluginPipeline, TreeBuilder};
use crate::infrastructure::render::HtmlRenderer;

/// Service tuning knobs
#[derive(Debug, Clone)]
pub struct ArtifactServiceConfig {
    /// TTL for cached artifacts
    pub cache_ttl: Duration,
    /// Bound on concurrently processed documents during warm-up
    pub max_concurrent_documents: usize,
}

impl Default for ArtifactServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(3600),
            max_concurrent_documents: 8,
        }
    }
}

impl ArtifactServiceConfig {
    /// Sets the artifact TTL
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Sets the warm-up concurrency bound
    pub fn with_max_concurrent_documents(mut self, bound: usize) -> Self {
        self.max_concurrent_documents = bound.max(1);
        self
    }
}

/// Computes and caches derived artifacts for markdown documents
#[derive(Debug)]
pub struct MarkdownArtifactService {
    cache: Arc<dyn Cache>,
    registry: Arc<dyn DocumentRegistry>,
    pipeline: Arc<PluginPipeline>,
    tree_builder: TreeBuilder,
    renderer: HtmlRenderer,
    keys: ArtifactKeyDeriver,
    config: ArtifactServiceConfig,
}

impl MarkdownArtifactService {
    /// Creates a service with default configuration
    pub fn new(
        cache: Arc<dyn Cache>,
        registry: Arc<dyn DocumentRegistry>,
        pipeline: Arc<PluginPipeline>,
    ) -> Self {
        Self::with_config(cache, registry, pipeline, ArtifactServiceConfig::default())
    }

    /// Creates a service with custom configuration
    pub fn with_config(
        cache: Arc<dyn Cache>,
        registry: Arc<dyn DocumentRegistry>,
        pipeline: Arc<PluginPipeline>,
        config: ArtifactServiceConfig,
    ) -> Self {
        let keys = ArtifactKeyDeriver::new();
        let tree_builder = TreeBuilder::new(
            pipeline.clone(),
            cache.clone(),
            registry.clone(),
            keys.clone(),
            config.cache_ttl,
        );

        Self {
            cache,
            registry,
            pipeline,
            tree_builder,
            renderer: HtmlRenderer::new(),
            keys,
            config,
        }
    }

    fn key(&self, kind: ArtifactKind, document: &Document) -> String {
        self.keys
            .derive(kind, document.content_digest(), self.pipeline.fingerprint())
    }

    /// Rendered HTML output, with dangerous raw-markup passthrough
    pub async fn rendered_output(&self, document: &Document) -> Result<String, DomainError> {
        let key = self.key(ArtifactKind::RenderedOutput, document);

        if let Some(html) = self.cache.get_best_effort::<String>(&key).await {
            return Ok(html);
        }

        let tree = self.tree_builder.build(document).await?;
        let html = self.renderer.render(&tree);

        self.cache
            .set_best_effort(&key, &html, self.config.cache_ttl)
            .await;

        Ok(html)
    }

    /// The canonical tree, serialized to JSON
    pub async fn ast(&self, document: &Document) -> Result<String, DomainError> {
        let tree = self.tree_builder.build(document).await?;

        serde_json::to_string(&*tree)
            .map_err(|e| DomainError::serialization(format!("Failed to serialize tree: {}", e)))
    }

    /// Plain-text excerpt, truncated to `max_length` characters
    /// (default 140) with an ellipsis marker when cut.
    ///
    /// The untruncated joined text is the cached artifact; the length is a
    /// request parameter, not a cache dimension.
    pub async fn excerpt(
        &self,
        document: &Document,
        max_length: Option<usize>,
    ) -> Result<String, DomainError> {
        let key = self.key(ArtifactKind::Excerpt, document);

        let source = match self.cache.get_best_effort::<String>(&key).await {
            Some(source) => source,
            None => {
                let tree = self.tree_builder.build(document).await?;
                let source = derive::excerpt_source(&tree);

                self.cache
                    .set_best_effort(&key, &source, self.config.cache_ttl)
                    .await;

                source
            }
        };

        Ok(derive::prune(
            &source,
            max_length.unwrap_or(derive::DEFAULT_EXCERPT_LENGTH),
        ))
    }

    /// Headings in document order, optionally filtered to one depth.
    ///
    /// The filter is applied after cache retrieval and is not part of the
    /// cache key.
    pub async fn headings(
        &self,
        document: &Document,
        depth: Option<u8>,
    ) -> Result<Vec<Heading>, DomainError> {
        if let Some(depth) = depth {
            if !(1..=6).contains(&depth) {
                return Err(DomainError::validation(format!(
                    "Heading depth must be between 1 and 6, got {}",
                    depth
                )));
            }
        }

        let key = self.key(ArtifactKind::Headings, document);

        let headings = match self.cache.get_best_effort::<Vec<Heading>>(&key).await {
            Some(headings) => headings,
            None => {
                let tree = self.tree_builder.build(document).await?;
                let headings = derive::collect_headings(&tree);

                self.cache
                    .set_best_effort(&key, &headings, self.config.cache_ttl)
                    .await;

                headings
            }
        };

        Ok(match depth {
            Some(depth) => derive::filter_by_depth(headings, depth),
            None => headings,
        })
    }

    /// Estimated reading time in whole minutes, never below one
    pub async fn time_to_read(&self, document: &Document) -> Result<u32, DomainError> {
        let key = self.key(ArtifactKind::TimeToRead, document);

        if let Some(minutes) = self.cache.get_best_effort::<u32>(&key).await {
            return Ok(minutes);
        }

        let rendered = self.rendered_output(document).await?;
        let minutes = derive::time_to_read(&rendered);

        self.cache
            .set_best_effort(&key, &minutes, self.config.cache_ttl)
            .await;

        Ok(minutes)
    }

    /// Table of contents rendered to HTML; the empty string when the
    /// document has no headings (documented default, not an error)
    pub async fn table_of_contents(&self, document: &Document) -> Result<String, DomainError> {
        let key = self.key(ArtifactKind::TableOfContents, document);

        if let Some(toc) = self.cache.get_best_effort::<String>(&key).await {
            return Ok(toc);
        }

        let tree = self.tree_builder.build(document).await?;
        let toc = match derive::table_of_contents(&tree) {
            Some(outline) => self.renderer.render(&outline),
            None => String::new(),
        };

        self.cache
            .set_best_effort(&key, &toc, self.config.cache_ttl)
            .await;

        Ok(toc)
    }

    /// Naive whitespace-delimited word count over the raw content
    pub async fn word_count(&self, document: &Document) -> Result<WordCount, DomainError> {
        let key = self.key(ArtifactKind::WordCount, document);

        if let Some(count) = self.cache.get_best_effort::<WordCount>(&key).await {
            return Ok(count);
        }

        let count = derive::word_count(document.content());

        self.cache
            .set_best_effort(&key, &count, self.config.cache_ttl)
            .await;

        Ok(count)
    }

    /// Prebuilds rendered output for every document in the registry,
    /// bounded by the configured concurrency limit.
    ///
    /// A failure in one document never affects its siblings; returns the
    /// number of documents warmed successfully.
    pub async fn warm_all(&self) -> Result<usize, DomainError> {
        let documents = self.registry.list_all().await?;
        let semaphore = Semaphore::new(self.config.max_concurrent_documents);

        debug!(
            documents = documents.len(),
            bound = self.config.max_concurrent_documents,
            "warming artifact cache"
        );

        let results = join_all(documents.iter().map(|document| {
            let semaphore = &semaphore;
            async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .map_err(|e| DomainError::internal(format!("semaphore closed: {}", e)))?;

                self.rendered_output(document).await
            }
        }))
        .await;

        let mut warmed = 0;
        for (document, result) in documents.iter().zip(results) {
            match result {
                Ok(_) => warmed += 1,
                Err(e) => {
                    warn!(document = %document.id(), error = %e, "artifact warm-up failed")
                }
            }
        }

        Ok(warmed)
    }
}
