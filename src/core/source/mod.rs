//! Definition sources: where build/release definitions and the lookups they
//! depend on come from. Everything a source returns is read-only for the run.

pub mod index;
pub mod snapshot;

pub use index::{Catalog, CatalogEntry, InputSpec, TaskGroupMap, TaskGroupVersion, VariableGroupMap};
pub use snapshot::{SnapshotSource, SourceError};

use crate::core::error::AppError;
use crate::core::types::DefinitionKind;
use yamlforge_types::{BuildDefinition, ReleaseDefinition};

/// One definition to convert. Build and release context never coexist.
#[derive(Debug, Clone)]
pub enum Definition {
    Build(BuildDefinition),
    Release(ReleaseDefinition),
}

impl Definition {
    pub fn id(&self) -> i64 {
        match self {
            Definition::Build(build) => build.id,
            Definition::Release(release) => release.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Definition::Build(build) => &build.name,
            Definition::Release(release) => &release.name,
        }
    }

    pub fn kind(&self) -> DefinitionKind {
        match self {
            Definition::Build(_) => DefinitionKind::Build,
            Definition::Release(_) => DefinitionKind::Release,
        }
    }

    /// Case-insensitive substring match on the definition name.
    pub fn matches_filter(&self, filter: &str) -> bool {
        self.name().to_lowercase().contains(&filter.to_lowercase())
    }
}

/// Everything one generation run reads from upstream.
#[derive(Debug, Clone, Default)]
pub struct SourceData {
    pub project: String,
    pub definitions: Vec<Definition>,
    pub catalog: Catalog,
    pub task_groups: TaskGroupMap,
    pub variable_groups: VariableGroupMap,
}

impl SourceData {
    pub fn build_count(&self) -> usize {
        self.definitions
            .iter()
            .filter(|definition| matches!(definition, Definition::Build(_)))
            .count()
    }

    pub fn release_count(&self) -> usize {
        self.definitions.len() - self.build_count()
    }
}

/// Provider of definitions and their lookups.
pub trait DefinitionSource {
    fn name(&self) -> &str;
    fn load(&self) -> Result<SourceData, AppError>;
}
