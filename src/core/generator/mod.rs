//! Generation engine: turns designer definitions into pipeline documents and
//! task group templates.
//!
//! The entry point is [`GenerationContext::assemble`]. Everything it reads is
//! immutable for the run except the template cache, which is shared by every
//! worker and filled lazily.

pub mod assembler;
pub mod expander;
pub mod inputs;
pub mod model;
pub mod template_cache;
pub mod trigger;
pub mod variables;

pub use expander::{parse_major_version, TaskInvocation};
pub use model::{
    IncludeExclude, Job, Parameters, Pipeline, PipelineBody, Pool, Stage, Step, TaskStep,
    Template, TemplateStep, Trigger, Variable, TEMPLATES_FOLDER,
};
pub use template_cache::TemplateCache;

use crate::core::source::{Catalog, SourceData, TaskGroupMap, VariableGroupMap};

/// Run-wide switches that change the shape of generated documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Splice task group steps into the caller instead of emitting template references.
    pub inline_task_groups: bool,
}

/// Run-scoped state shared by every definition worker.
#[derive(Debug)]
pub struct GenerationContext {
    pub catalog: Catalog,
    pub task_groups: TaskGroupMap,
    pub variable_groups: VariableGroupMap,
    pub templates: TemplateCache,
    pub settings: GenerationSettings,
}

impl GenerationContext {
    pub fn new(
        catalog: Catalog,
        task_groups: TaskGroupMap,
        variable_groups: VariableGroupMap,
        settings: GenerationSettings,
    ) -> Self {
        GenerationContext {
            catalog,
            task_groups,
            variable_groups,
            templates: TemplateCache::new(),
            settings,
        }
    }

    /// Move the lookups out of loaded source data; definitions are left behind.
    pub fn from_source(data: &mut SourceData, settings: GenerationSettings) -> Self {
        Self::new(
            std::mem::take(&mut data.catalog),
            std::mem::take(&mut data.task_groups),
            std::mem::take(&mut data.variable_groups),
            settings,
        )
    }
}
