//! Plugin registry
//!
//! Built once at startup from typed plugin values and injected into the
//! pipeline. Registration order is the execution order of both plugin
//! phases, and the ordered plugin names form the plugin-set fingerprint
//! that participates in every cache key.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use super::entity::MarkdownPlugin;

/// Ordered set of active plugins
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn MarkdownPlugin>>,
}

impl PluginRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plugin; order of registration is order of execution
    pub fn register(&mut self, plugin: Arc<dyn MarkdownPlugin>) {
        self.plugins.push(plugin);
    }

    /// Builder-style registration
    pub fn with_plugin(mut self, plugin: Arc<dyn MarkdownPlugin>) -> Self {
        self.register(plugin);
        self
    }

    /// The registered plugins, in registration order
    pub fn plugins(&self) -> &[Arc<dyn MarkdownPlugin>] {
        &self.plugins
    }

    /// Plugin names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Stable fingerprint of the active plugin set.
    ///
    /// Changing membership or order changes the fingerprint, which
    /// invalidates every artifact for every document.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();

        for plugin in &self.plugins {
            hasher.update(plugin.name().as_bytes());
            hasher.update([0u8]);
        }

        let digest = hex::encode(hasher.finalize());
        digest[..16].to_string()
    }
}
