use super::{Catalog, Definition, DefinitionSource, SourceData, TaskGroupMap, VariableGroupMap};
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use crate::utils::{FileSerializer, FileUtils, JsonSerializer, YamlSerializer};
use std::path::{Path, PathBuf};
use yamlforge_types::ProjectSnapshot;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Snapshot file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Unsupported snapshot format '{0}' (expected .json, .yml or .yaml)")]
    UnsupportedFormat(String),
    #[error("Failed to parse snapshot {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
    #[error("Snapshot does not name a project")]
    MissingProject,
}

impl SourceError {
    pub fn code(&self) -> &'static str {
        match self {
            SourceError::NotFound(_) => "SRC-001",
            SourceError::UnsupportedFormat(_) => "SRC-002",
            SourceError::Parse { .. } => "SRC-003",
            SourceError::MissingProject => "SRC-004",
        }
    }
}

impl From<SourceError> for AppError {
    fn from(error: SourceError) -> Self {
        let category = match error {
            SourceError::NotFound(_) => ErrorCategory::IoError,
            SourceError::Parse { .. } => ErrorCategory::SerializationError,
            SourceError::UnsupportedFormat(_) | SourceError::MissingProject => {
                ErrorCategory::ValidationError
            }
        };
        let code = error.code();
        AppError::new(category, error.to_string()).with_code(code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    fn detect(path: &Path) -> Result<Self, SourceError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(SnapshotFormat::Json),
            "yml" | "yaml" => Ok(SnapshotFormat::Yaml),
            other => Err(SourceError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Loads a project export from a local JSON or YAML file.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        SnapshotSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_snapshot(&self) -> Result<ProjectSnapshot, SourceError> {
        if !self.path.is_file() {
            return Err(SourceError::NotFound(self.path.clone()));
        }
        let parsed = match SnapshotFormat::detect(&self.path)? {
            SnapshotFormat::Json => FileUtils.load_from_file(&self.path, &JsonSerializer),
            SnapshotFormat::Yaml => FileUtils.load_from_file(&self.path, &YamlSerializer),
        };
        parsed.map_err(|e| SourceError::Parse {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

impl DefinitionSource for SnapshotSource {
    fn name(&self) -> &str {
        "snapshot"
    }

    fn load(&self) -> Result<SourceData, AppError> {
        let snapshot = self.read_snapshot()?;
        let data = index_snapshot(snapshot)?;
        tracing::info!(
            path = %self.path.display(),
            project = %data.project,
            builds = data.build_count(),
            releases = data.release_count(),
            tasks = data.catalog.len(),
            task_groups = data.task_groups.len(),
            variable_groups = data.variable_groups.len(),
            "snapshot loaded"
        );
        Ok(data)
    }
}

/// Index raw snapshot records and keep only convertible definitions.
pub fn index_snapshot(snapshot: ProjectSnapshot) -> Result<SourceData, SourceError> {
    if snapshot.project.trim().is_empty() {
        return Err(SourceError::MissingProject);
    }

    let mut definitions = Vec::with_capacity(
        snapshot.build_definitions.len() + snapshot.release_definitions.len(),
    );
    for build in snapshot.build_definitions {
        if build.designer_phases().is_none() {
            tracing::debug!(
                id = build.id,
                name = %build.name,
                "skipping build definition without a designer process"
            );
            continue;
        }
        definitions.push(Definition::Build(build));
    }
    definitions.extend(
        snapshot
            .release_definitions
            .into_iter()
            .map(Definition::Release),
    );

    Ok(SourceData {
        project: snapshot.project,
        definitions,
        catalog: Catalog::from_tasks(&snapshot.tasks),
        task_groups: TaskGroupMap::from_groups(&snapshot.task_groups),
        variable_groups: VariableGroupMap::from_groups(&snapshot.variable_groups),
    })
}
