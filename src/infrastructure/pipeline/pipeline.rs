//! Plugin pipeline
//!
//! Runs the registered plugins' hooks for one document and composes their
//! effects. The parser-extension phase happens once, at construction. The
//! source-mutation phase runs all capable plugins concurrently and is a
//! barrier before parsing. The tree-transform phase is strictly sequential:
//! transformer i+1 sees the tree as left by transformer i.

use std::time::Duration;

use futures::future::try_join_all;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::DomainError;
use crate::domain::document::{Document, DocumentRegistry};
use crate::domain::plugin::{MutationContext, PluginRegistry, TransformContext};
use crate::domain::tree::MarkdownNode;

use super::parser::MarkdownSourceParser;

/// Pipeline tuning knobs
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Time limit for a single plugin hook invocation
    pub plugin_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            plugin_timeout: Duration::from_secs(5),
        }
    }
}

impl PipelineConfig {
    /// Sets the per-plugin-call timeout
    pub fn with_plugin_timeout(mut self, timeout: Duration) -> Self {
        self.plugin_timeout = timeout;
        self
    }
}

/// The plugin pipeline for one active plugin set.
///
/// Owns the shared parser, configured from every plugin's grammar
/// extensions at construction time, and the plugin-set fingerprint that
/// participates in every cache key.
#[derive(Debug)]
pub struct PluginPipeline {
    registry: PluginRegistry,
    parser: MarkdownSourceParser,
    fingerprint: String,
    config: PipelineConfig,
}

impl PluginPipeline {
    /// Activates a plugin set: collects parser extensions in registration
    /// order and fixes the fingerprint
    pub fn new(registry: PluginRegistry, config: PipelineConfig) -> Self {
        let extensions: Vec<_> = registry
            .plugins()
            .iter()
            .flat_map(|plugin| plugin.parser_extensions())
            .collect();

        debug!(
            plugins = registry.len(),
            extensions = extensions.len(),
            "activating plugin pipeline"
        );

        let parser = MarkdownSourceParser::with_extensions(&extensions);
        let fingerprint = registry.fingerprint();

        Self {
            registry,
            parser,
            fingerprint,
            config,
        }
    }

    /// Fingerprint of the active plugin set
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Parses fixed-up content with the shared parser configuration
    pub fn parse(&self, content: &str) -> Result<MarkdownNode, DomainError> {
        self.parser.parse(content)
    }

    /// Runs the source-mutation phase and returns the fixed-up content.
    ///
    /// All capable plugins run concurrently against a shared working copy;
    /// the phase completes only when every plugin has finished. A single
    /// plugin failure aborts the build for this document only.
    pub async fn run_source_mutation(
        &self,
        document: &Document,
        documents: &[Document],
        registry: &dyn DocumentRegistry,
    ) -> Result<String, DomainError> {
        let mutators: Vec<_> = self
            .registry
            .plugins()
            .iter()
            .filter_map(|plugin| plugin.source_mutator().map(|m| (plugin.name(), m)))
            .collect();

        if mutators.is_empty() {
            return Ok(document.content().to_string());
        }

        debug!(
            document = %document.id(),
            mutators = mutators.len(),
            "running source-mutation phase"
        );

        let content = Mutex::new(document.content().to_string());
        let ctx = MutationContext {
            document,
            content: &content,
            documents,
            registry,
        };

        try_join_all(mutators.into_iter().map(|(name, mutator)| {
            let ctx = &ctx;
            async move {
                tokio::time::timeout(self.config.plugin_timeout, mutator.mutate_source(ctx))
                    .await
                    .map_err(|_| {
                        DomainError::plugin(
                            name,
                            format!(
                                "source mutation exceeded {:?}",
                                self.config.plugin_timeout
                            ),
                        )
                    })?
                    .map_err(|e| plugin_failure(name, e))
            }
        }))
        .await?;

        Ok(content.into_inner())
    }

    /// Runs the tree-transform phase: a sequential fold over the registered
    /// transformers, in registration order. After the last transformer the
    /// tree is frozen by the caller.
    pub async fn run_tree_transform(
        &self,
        tree: &mut MarkdownNode,
        document: &Document,
        documents: &[Document],
        registry: &dyn DocumentRegistry,
    ) -> Result<(), DomainError> {
        for plugin in self.registry.plugins() {
            let Some(transformer) = plugin.tree_transformer() else {
                continue;
            };

            debug!(
                document = %document.id(),
                plugin = plugin.name(),
                "running tree transformer"
            );

            let ctx = TransformContext {
                document,
                documents,
                registry,
            };

            tokio::time::timeout(self.config.plugin_timeout, transformer.transform(tree, &ctx))
                .await
                .map_err(|_| {
                    DomainError::plugin(
                        plugin.name(),
                        format!("tree transform exceeded {:?}", self.config.plugin_timeout),
                    )
                })?
                .map_err(|e| plugin_failure(plugin.name(), e))?;
        }

        Ok(())
    }
}

/// Surfaces any plugin hook error as a failure attributed to that plugin
fn plugin_failure(name: &str, error: DomainError) -> DomainError {
    match error {
        DomainError::Plugin { .. } => error,
        other => DomainError::plugin(name, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::DocumentId;
    use crate::domain::plugin::{MarkdownPlugin, ParserExtension, SourceMutator, TreeTransformer};
    use crate::infrastructure::document::InMemoryDocumentRegistry;

    #[derive(Debug)]
    struct SuffixMutator {
        name: &'static str,
        suffix: &'static str,
    }

    #[async_trait]
    impl SourceMutator for SuffixMutator {
        async fn mutate_source(&self, ctx: &MutationContext<'_>) -> Result<(), DomainError> {
            let mut content = ctx.content.lock().await;
            content.push_str(self.suffix);
            Ok(())
        }
    }

    impl MarkdownPlugin for SuffixMutator {
        fn name(&self) -> &str {
            self.name
        }

        fn source_mutator(&self) -> Option<&dyn SourceMutator> {
            Some(self)
        }
    }

    #[derive(Debug)]
    struct FailingMutator;

    #[async_trait]
    impl SourceMutator for FailingMutator {
        async fn mutate_source(&self, _ctx: &MutationContext<'_>) -> Result<(), DomainError> {
            Err(DomainError::internal("boom"))
        }
    }

    impl MarkdownPlugin for FailingMutator {
        fn name(&self) -> &str {
            "failing"
        }

        fn source_mutator(&self) -> Option<&dyn SourceMutator> {
            Some(self)
        }
    }

    #[derive(Debug)]
    struct SlowMutator;

    #[async_trait]
    impl SourceMutator for SlowMutator {
        async fn mutate_source(&self, _ctx: &MutationContext<'_>) -> Result<(), DomainError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    impl MarkdownPlugin for SlowMutator {
        fn name(&self) -> &str {
            "slow"
        }

        fn source_mutator(&self) -> Option<&dyn SourceMutator> {
            Some(self)
        }
    }

    /// Appends a marker paragraph so transform order is observable
    #[derive(Debug)]
    struct MarkerTransformer {
        name: &'static str,
        marker: &'static str,
    }

    #[async_trait]
    impl TreeTransformer for MarkerTransformer {
        async fn transform(
            &self,
            tree: &mut MarkdownNode,
            _ctx: &TransformContext<'_>,
        ) -> Result<(), DomainError> {
            if let Some(children) = tree.children_mut() {
                children.push(MarkdownNode::Paragraph {
                    children: vec![MarkdownNode::text(self.marker)],
                });
            }
            Ok(())
        }
    }

    impl MarkdownPlugin for MarkerTransformer {
        fn name(&self) -> &str {
            self.name
        }

        fn tree_transformer(&self) -> Option<&dyn TreeTransformer> {
            Some(self)
        }
    }

    #[derive(Debug)]
    struct ExtensionOnly;

    impl MarkdownPlugin for ExtensionOnly {
        fn name(&self) -> &str {
            "extension-only"
        }

        fn parser_extensions(&self) -> Vec<ParserExtension> {
            vec![ParserExtension::Strikethrough]
        }
    }

    fn pipeline_of(plugins: Vec<Arc<dyn MarkdownPlugin>>) -> PluginPipeline {
        let mut registry = PluginRegistry::new();
        for plugin in plugins {
            registry.register(plugin);
        }
        PluginPipeline::new(registry, PipelineConfig::default())
    }

    fn document(content: &str) -> Document {
        let digest = crate::infrastructure::document::content_digest(content);
        Document::new(DocumentId::new("doc").unwrap(), content, digest)
    }

    #[tokio::test]
    async fn test_mutation_phase_applies_all_mutators() {
        let pipeline = pipeline_of(vec![
            Arc::new(SuffixMutator {
                name: "a",
                suffix: " alpha",
            }),
            Arc::new(SuffixMutator {
                name: "b",
                suffix: " beta",
            }),
        ]);
        let registry = InMemoryDocumentRegistry::new();
        let doc = document("base");

        let mutated = pipeline
            .run_source_mutation(&doc, &[], &registry)
            .await
            .unwrap();

        // Concurrent and commutative: both suffixes land, in either order
        assert!(mutated.starts_with("base"));
        assert!(mutated.contains(" alpha"));
        assert!(mutated.contains(" beta"));
    }

    #[tokio::test]
    async fn test_mutation_phase_without_mutators_passes_content_through() {
        let pipeline = pipeline_of(vec![Arc::new(ExtensionOnly)]);
        let registry = InMemoryDocumentRegistry::new();
        let doc = document("untouched");

        let mutated = pipeline
            .run_source_mutation(&doc, &[], &registry)
            .await
            .unwrap();

        assert_eq!(mutated, "untouched");
    }

    #[tokio::test]
    async fn test_mutation_failure_aborts_build() {
        let pipeline = pipeline_of(vec![
            Arc::new(SuffixMutator {
                name: "ok",
                suffix: " fine",
            }),
            Arc::new(FailingMutator),
        ]);
        let registry = InMemoryDocumentRegistry::new();
        let doc = document("base");

        let error = pipeline
            .run_source_mutation(&doc, &[], &registry)
            .await
            .unwrap_err();

        assert!(error.is_plugin_failure());
        assert!(error.to_string().contains("failing"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutation_timeout_is_a_plugin_failure() {
        let registry =
            PluginRegistry::new().with_plugin(Arc::new(SlowMutator) as Arc<dyn MarkdownPlugin>);
        let pipeline = PluginPipeline::new(
            registry,
            PipelineConfig::default().with_plugin_timeout(Duration::from_millis(10)),
        );
        let documents = InMemoryDocumentRegistry::new();
        let doc = document("base");

        let error = pipeline
            .run_source_mutation(&doc, &[], &documents)
            .await
            .unwrap_err();

        assert!(error.is_plugin_failure());
        assert!(error.to_string().contains("slow"));
    }

    #[tokio::test]
    async fn test_transform_phase_runs_in_registration_order() {
        let pipeline = pipeline_of(vec![
            Arc::new(MarkerTransformer {
                name: "first",
                marker: "one",
            }),
            Arc::new(MarkerTransformer {
                name: "second",
                marker: "two",
            }),
        ]);
        let registry = InMemoryDocumentRegistry::new();
        let doc = document("");
        let mut tree = MarkdownNode::root();

        pipeline
            .run_tree_transform(&mut tree, &doc, &[], &registry)
            .await
            .unwrap();

        let mut texts = Vec::new();
        tree.visit(&mut |node| {
            if let MarkdownNode::Text { value } = node {
                texts.push(value.clone());
            }
        });

        assert_eq!(texts, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_parser_extensions_collected_from_plugins() {
        let pipeline = pipeline_of(vec![Arc::new(ExtensionOnly)]);

        let tree = pipeline.parse("~~gone~~").unwrap();
        let mut found = false;
        tree.visit(&mut |node| {
            if matches!(node, MarkdownNode::Strikethrough { .. }) {
                found = true;
            }
        });

        assert!(found);
    }

    #[test]
    fn test_fingerprint_exposed() {
        let a = pipeline_of(vec![Arc::new(ExtensionOnly)]);
        let b = pipeline_of(vec![]);

        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
