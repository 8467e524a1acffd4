#![allow(clippy::result_large_err)]

use super::YamlforgeConfig;
use crate::core::error::AppError;
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "yamlforge.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from the working directory (workdir/yamlforge.toml)
    /// Environment variables override config file values
    pub fn load_from_workspace(workspace_path: &Path) -> Result<YamlforgeConfig, AppError> {
        let config_path = workspace_path.join(CONFIG_FILE_NAME);
        Self::load(&config_path)
    }

    /// Load config from an explicit path, falling back to defaults when it is missing,
    /// then apply environment overrides.
    pub fn load(config_path: &Path) -> Result<YamlforgeConfig, AppError> {
        let config_file = Self::load_from_file(config_path)?;

        let mut config = config_file.unwrap_or_default();

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut config);

        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<YamlforgeConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                crate::core::types::ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
            .with_code("CFG-001")
        })?;

        let config: YamlforgeConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                crate::core::types::ErrorCategory::ValidationError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
            .with_code("CFG-002")
        })?;

        Ok(Some(config))
    }

    /// Apply environment variable overrides to the configuration
    /// Environment variables take precedence over config file values
    fn apply_env_overrides(config: &mut YamlforgeConfig) {
        // Generation overrides
        if let Ok(inline_str) = env::var("YAMLFORGE_INLINE_TASK_GROUPS") {
            if let Ok(inline) = inline_str.parse::<bool>() {
                config.generation.inline_task_groups = inline;
            }
        }

        if let Ok(parallel_str) = env::var("YAMLFORGE_PARALLEL") {
            if let Ok(parallel) = parallel_str.parse::<bool>() {
                config.generation.parallel = parallel;
            }
        }

        if let Ok(limit_str) = env::var("YAMLFORGE_PARALLEL_LIMIT") {
            if let Ok(limit) = limit_str.parse::<usize>() {
                config.generation.parallel_limit = Some(limit);
            }
        }

        // Output overrides
        if let Ok(path) = env::var("YAMLFORGE_OUTPUT_PATH") {
            config.output.path = PathBuf::from(path);
        }

        if let Ok(filter) = env::var("YAMLFORGE_FILTER") {
            config.output.filter = Some(filter);
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "YAMLFORGE_INLINE_TASK_GROUPS - Inline task group steps instead of writing templates (true/false, default: false)",
            "YAMLFORGE_PARALLEL - Process definitions concurrently (true/false, default: true)",
            "YAMLFORGE_PARALLEL_LIMIT - Maximum definitions processed at once (default: host core count)",
            "YAMLFORGE_OUTPUT_PATH - Output folder (default: current directory)",
            "YAMLFORGE_FILTER - Case-insensitive definition name filter",
        ]
    }

    /// Validate configuration values
    pub fn validate_config(config: &YamlforgeConfig) -> Result<(), AppError> {
        super::ConfigValidator::validate(config)
    }
}
