use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Maximum number of cached artifacts
    pub max_capacity: u64,
    /// Artifact time-to-live in seconds
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    /// Time limit for a single plugin hook invocation, in milliseconds
    pub plugin_timeout_ms: u64,
    /// Bound on concurrently processed documents during warm-up
    pub max_concurrent_documents: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl_secs: 3600,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            plugin_timeout_ms: 5_000,
            max_concurrent_documents: 8,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
