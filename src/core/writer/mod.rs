//! Persists generated pipelines and templates as YAML files.

use crate::core::error::AppError;
use crate::core::generator::{Template, TEMPLATES_FOLDER};
use crate::core::orchestrator::{DefinitionSummary, GeneratedPipeline, GenerationReport};
use crate::core::types::DefinitionKind;
use crate::utils::{sanitize_name, FileSerializer, FileUtils, YamlSerializer};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const BUILDS_FOLDER: &str = "AzureDevOpsBuilds";
pub const RELEASES_FOLDER: &str = "AzureDevOpsReleases";

/// Output root: `output/<project>` unless `output` already ends with the project name.
pub fn resolve_output_root(output: &Path, project: &str) -> PathBuf {
    let already_scoped = output
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case(project));
    if already_scoped {
        output.to_path_buf()
    } else {
        output.join(project)
    }
}

#[derive(Debug, Clone)]
pub struct YamlWriter {
    root: PathBuf,
}

impl YamlWriter {
    pub fn new(output: &Path, project: &str) -> Self {
        YamlWriter {
            root: resolve_output_root(output, project),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pipeline_path(&self, definition: &DefinitionSummary) -> PathBuf {
        let folder = match definition.kind {
            DefinitionKind::Release => RELEASES_FOLDER,
            DefinitionKind::Build | DefinitionKind::TaskGroup => BUILDS_FOLDER,
        };
        self.root.join(folder).join(format!(
            "{}-{}.yml",
            sanitize_name(&definition.name),
            definition.id
        ))
    }

    pub fn template_path(&self, template: &Template) -> PathBuf {
        self.root.join(TEMPLATES_FOLDER).join(template.file_name())
    }

    pub fn write_pipeline(&self, generated: &GeneratedPipeline) -> Result<PathBuf, AppError> {
        let path = self.pipeline_path(&generated.definition);
        self.write_document(&path, &generated.pipeline)
            .map_err(|e| e.with_context("definition", generated.definition.to_string()))?;
        Ok(path)
    }

    pub fn write_template(&self, template: &Template) -> Result<PathBuf, AppError> {
        let path = self.template_path(template);
        self.write_document(&path, template)
            .map_err(|e| e.with_context("task_group", template.key.to_string()))?;
        Ok(path)
    }

    /// Write every document in the report. Write failures are recorded on the
    /// report apart from generation failures and do not stop the remaining writes.
    pub fn write_report(&self, report: &mut GenerationReport) -> usize {
        let mut failures = Vec::new();
        let mut written = 0;

        for generated in &report.pipelines {
            match self.write_pipeline(generated) {
                Ok(path) => {
                    tracing::debug!(path = %path.display(), "pipeline written");
                    written += 1;
                }
                Err(error) => failures.push((generated.definition.clone(), error)),
            }
        }
        for template in &report.templates {
            match self.write_template(template) {
                Ok(path) => {
                    tracing::debug!(path = %path.display(), "template written");
                    written += 1;
                }
                Err(error) => failures.push((
                    DefinitionSummary {
                        kind: DefinitionKind::TaskGroup,
                        id: template.key.to_string(),
                        name: template.file_stem.clone(),
                    },
                    error,
                )),
            }
        }

        for (definition, error) in failures {
            tracing::warn!(definition = %definition, "{}", error.message);
            report.record_write_failure(definition, error);
        }
        report.files_written += written;
        tracing::info!(root = %self.root.display(), files = written, "documents written");
        written
    }

    fn write_document<T: Serialize>(&self, path: &Path, document: &T) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_error(path, e))?;
        }
        FileUtils
            .save_to_file(path, document, &YamlSerializer)
            .map_err(|e| write_error(path, e))
    }
}

fn write_error(path: &Path, reason: impl std::fmt::Display) -> AppError {
    AppError::write_failed(format!("failed to write {}: {}", path.display(), reason))
        .with_context("path", path.display().to_string())
}
