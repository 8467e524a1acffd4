use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main yamlforge configuration loaded from yamlforge.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct YamlforgeConfig {
    /// Generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Splice task group steps into pipelines instead of writing templates
    #[serde(default)]
    pub inline_task_groups: bool,

    /// Process definitions concurrently
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Upper bound on concurrent definitions; host core count when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel_limit: Option<usize>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Folder the project folder is created in
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Case-insensitive substring a definition name must contain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

fn default_parallel() -> bool {
    true
}

fn default_output_path() -> PathBuf {
    PathBuf::from(".")
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            inline_task_groups: false,
            parallel: default_parallel(),
            parallel_limit: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: default_output_path(),
            filter: None,
        }
    }
}

impl YamlforgeConfig {
    /// Effective worker count: 1 when parallelism is off.
    pub fn effective_parallel_limit(&self) -> usize {
        if !self.generation.parallel {
            return 1;
        }
        self.generation
            .parallel_limit
            .unwrap_or_else(crate::core::orchestrator::default_parallel_limit)
            .max(1)
    }
}


pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;
