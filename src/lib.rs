//! Markdown Artifact Pipeline
//!
//! Computes and caches derived artifacts from markdown documents:
//! - the canonical parsed tree (`ast`),
//! - rendered HTML output,
//! - section headings and a table of contents,
//! - plain-text excerpts,
//! - word counts and reading-time estimates.
//!
//! Every artifact is cached under a key derived from the document's content
//! digest and the active plugin-set fingerprint, so changing content or the
//! plugin set (membership *or* order) invalidates exactly the right
//! entries. Plugins compose through two per-document phases around one
//! shared parse: a concurrent source-mutation phase and a sequential
//! tree-transform phase, plus parser extensions applied once per plugin-set
//! activation.

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::cache::Cache;
use domain::document::DocumentRegistry;
use domain::plugin::PluginRegistry;
use infrastructure::cache::{InMemoryCache, InMemoryCacheConfig};
use infrastructure::pipeline::{PipelineConfig, PluginPipeline};
use infrastructure::plugin::{GfmPlugin, SmartPunctuationPlugin};
use infrastructure::services::{ArtifactServiceConfig, MarkdownArtifactService};
use std::time::Duration;
use tracing::info;

/// Create an artifact service with the default plugin set and configuration
pub fn create_artifact_service(registry: Arc<dyn DocumentRegistry>) -> MarkdownArtifactService {
    create_artifact_service_with_config(registry, default_plugins(), &AppConfig::default())
}

/// Create an artifact service with a custom plugin set and configuration
pub fn create_artifact_service_with_config(
    registry: Arc<dyn DocumentRegistry>,
    plugins: PluginRegistry,
    config: &AppConfig,
) -> MarkdownArtifactService {
    info!(
        plugins = plugins.len(),
        fingerprint = %plugins.fingerprint(),
        "initializing artifact pipeline"
    );

    let cache: Arc<dyn Cache> = Arc::new(InMemoryCache::with_config(
        InMemoryCacheConfig::default()
            .with_max_capacity(config.cache.max_capacity)
            .with_default_ttl(Duration::from_secs(config.cache.ttl_secs)),
    ));

    let pipeline = Arc::new(PluginPipeline::new(
        plugins,
        PipelineConfig::default()
            .with_plugin_timeout(Duration::from_millis(config.pipeline.plugin_timeout_ms)),
    ));

    MarkdownArtifactService::with_config(
        cache,
        registry,
        pipeline,
        ArtifactServiceConfig::default()
            .with_cache_ttl(Duration::from_secs(config.cache.ttl_secs))
            .with_max_concurrent_documents(config.pipeline.max_concurrent_documents),
    )
}

/// The default plugin set: GitHub-flavored extensions plus smart punctuation
pub fn default_plugins() -> PluginRegistry {
    PluginRegistry::new()
        .with_plugin(Arc::new(GfmPlugin::new()))
        .with_plugin(Arc::new(SmartPunctuationPlugin::new()))
}
