#![allow(clippy::result_large_err)]

use super::YamlforgeConfig;
use crate::core::error::AppError;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &YamlforgeConfig) -> Result<(), AppError> {
        if config.output.path.as_os_str().is_empty() {
            return Err(AppError::new(
                crate::core::types::ErrorCategory::ValidationError,
                "output.path cannot be empty",
            )
            .with_code("CFG-003"));
        }

        if config.generation.parallel_limit == Some(0) {
            return Err(AppError::new(
                crate::core::types::ErrorCategory::ValidationError,
                "generation.parallel_limit must be at least 1",
            )
            .with_code("CFG-004")
            .with_suggestion("Set generation.parallel = false to run sequentially"));
        }

        Ok(())
    }
}
