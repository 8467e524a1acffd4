//! Runs every definition through the generator, isolating failures per definition.

use crate::core::error::{AppError, CODE_WORKER_PANICKED};
use crate::core::generator::{GenerationContext, Pipeline, Template};
use crate::core::source::Definition;
use crate::core::types::{DefinitionKind, ErrorCategory};
use futures::stream::{self, StreamExt};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

/// Identity of a definition as it appears in reports and file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionSummary {
    pub kind: DefinitionKind,
    pub id: String,
    pub name: String,
}

impl From<&Definition> for DefinitionSummary {
    fn from(definition: &Definition) -> Self {
        DefinitionSummary {
            kind: definition.kind(),
            id: definition.id().to_string(),
            name: definition.name().to_string(),
        }
    }
}

impl std::fmt::Display for DefinitionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} '{}'", self.kind, self.id, self.name)
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedPipeline {
    pub definition: DefinitionSummary,
    pub pipeline: Pipeline,
}

#[derive(Debug)]
pub struct DefinitionFailure {
    pub definition: DefinitionSummary,
    pub error: AppError,
}

/// Everything one run produced, in input order.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub pipelines: Vec<GeneratedPipeline>,
    pub failures: Vec<DefinitionFailure>,
    /// Documents that were generated but could not be persisted.
    pub write_failures: Vec<DefinitionFailure>,
    pub templates: Vec<Arc<Template>>,
    pub files_written: usize,
}

impl GenerationReport {
    pub fn processed(&self) -> usize {
        self.pipelines.len() + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty() || !self.write_failures.is_empty()
    }

    /// Generation and write errors, in that order.
    pub fn errors(&self) -> impl Iterator<Item = &DefinitionFailure> {
        self.failures.iter().chain(&self.write_failures)
    }

    pub fn record_failure(&mut self, definition: DefinitionSummary, error: AppError) {
        self.failures.push(DefinitionFailure { definition, error });
    }

    pub fn record_write_failure(&mut self, definition: DefinitionSummary, error: AppError) {
        self.write_failures.push(DefinitionFailure { definition, error });
    }
}

/// Number of workers used when no limit is configured.
pub fn default_parallel_limit() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Keep definitions whose name contains `filter`, ignoring case.
pub fn filter_definitions(definitions: Vec<Definition>, filter: Option<&str>) -> Vec<Definition> {
    match filter.map(str::trim).filter(|f| !f.is_empty()) {
        Some(filter) => definitions
            .into_iter()
            .filter(|definition| definition.matches_filter(filter))
            .collect(),
        None => definitions,
    }
}

pub struct DefinitionOrchestrator {
    context: Arc<GenerationContext>,
    parallel_limit: usize,
}

impl DefinitionOrchestrator {
    pub fn new(context: Arc<GenerationContext>) -> Self {
        DefinitionOrchestrator {
            context,
            parallel_limit: default_parallel_limit(),
        }
    }

    /// Bound the number of definitions processed at once; 1 runs sequentially.
    pub fn with_parallel_limit(mut self, limit: usize) -> Self {
        self.parallel_limit = limit.max(1);
        self
    }

    pub fn parallel_limit(&self) -> usize {
        self.parallel_limit
    }

    pub fn context(&self) -> &Arc<GenerationContext> {
        &self.context
    }

    pub async fn run(&self, definitions: Vec<Definition>) -> GenerationReport {
        let started = Instant::now();
        let total = definitions.len();
        tracing::info!(
            definitions = total,
            parallel_limit = self.parallel_limit,
            inline_task_groups = self.context.settings.inline_task_groups,
            "generation started"
        );

        let mut outcomes: Vec<(usize, DefinitionSummary, Result<Pipeline, AppError>)> =
            stream::iter(definitions.into_iter().enumerate())
                .map(|(index, definition)| {
                    let context = Arc::clone(&self.context);
                    async move {
                        let summary = DefinitionSummary::from(&definition);
                        let result =
                            tokio::task::spawn_blocking(move || context.assemble(&definition))
                                .await
                                .unwrap_or_else(|join_error| {
                                    Err(AppError::new(
                                        ErrorCategory::InternalError,
                                        format!("definition worker stopped: {}", join_error),
                                    )
                                    .with_code(CODE_WORKER_PANICKED))
                                });
                        (index, summary, result)
                    }
                })
                .buffer_unordered(self.parallel_limit)
                .collect()
                .await;
        outcomes.sort_by_key(|(index, _, _)| *index);

        let mut report = GenerationReport::default();
        for (_, definition, result) in outcomes {
            match result {
                Ok(pipeline) => {
                    tracing::debug!(definition = %definition, "pipeline assembled");
                    report.pipelines.push(GeneratedPipeline {
                        definition,
                        pipeline,
                    });
                }
                Err(error) => {
                    tracing::warn!(definition = %definition, code = %error.code, "{}", error.message);
                    report.record_failure(definition, error);
                }
            }
        }
        if !self.context.settings.inline_task_groups {
            report.templates = self.context.templates.templates();
        }

        tracing::info!(
            pipelines = report.pipelines.len(),
            templates = report.templates.len(),
            failures = report.failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generation finished"
        );
        report
    }
}
