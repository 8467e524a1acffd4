use super::expander::{ExpansionScope, TaskInvocation};
use super::inputs::ParameterRewriter;
use super::model::{template_file_stem, Parameters, Template};
use super::GenerationContext;
use crate::core::error::{AppError, CODE_TASK_GROUP_CYCLE};
use crate::core::source::TaskGroupVersion;
use crate::core::types::ErrorCategory;
use dashmap::DashMap;
use std::sync::Arc;
use yamlforge_types::TaskGroup;

/// Lazily filled, run-wide map of built templates.
///
/// Builds run without holding any shard lock, so concurrent callers may build
/// the same key twice; only the first published value is ever handed out.
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: DashMap<TaskGroupVersion, Arc<Template>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &TaskGroupVersion) -> Option<Arc<Template>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    pub fn get_or_try_build<F>(&self, key: TaskGroupVersion, build: F) -> Result<Arc<Template>, AppError>
    where
        F: FnOnce() -> Result<Template, AppError>,
    {
        if let Some(found) = self.get(&key) {
            return Ok(found);
        }
        let built = Arc::new(build()?);
        let published = self.entries.entry(key).or_insert(built);
        Ok(Arc::clone(published.value()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every published template, ordered by key.
    pub fn templates(&self) -> Vec<Arc<Template>> {
        let mut templates: Vec<Arc<Template>> = self
            .entries
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        templates.sort_by_key(|template| template.key);
        templates
    }
}

impl GenerationContext {
    /// Get the published template for `key`, building it on first use.
    pub(crate) fn template_for(
        &self,
        key: TaskGroupVersion,
        scope: ExpansionScope<'_>,
    ) -> Result<Arc<Template>, AppError> {
        if let Some(found) = self.templates.get(&key) {
            return Ok(found);
        }
        if scope.stack.contains(&key) {
            return Err(self.cycle_error(key, scope.stack));
        }
        let group = self
            .task_groups
            .get(&key)
            .ok_or_else(|| AppError::unknown_task(key.group_id, key.major))?;

        self.templates
            .get_or_try_build(key, || self.build_template(key, group, scope))
    }

    fn build_template(
        &self,
        key: TaskGroupVersion,
        group: &TaskGroup,
        scope: ExpansionScope<'_>,
    ) -> Result<Template, AppError> {
        tracing::debug!(task_group = %group.name, key = %key, "building template");

        let parameters: Option<Parameters> = (!group.inputs.is_empty()).then(|| {
            group
                .inputs
                .iter()
                .map(|input| {
                    let default_value = input
                        .default_value
                        .clone()
                        .filter(|value| !value.trim().is_empty());
                    (input.name.clone(), default_value)
                })
                .collect()
        });

        let rewriter = if self.settings.inline_task_groups {
            None
        } else {
            ParameterRewriter::from_parameters(parameters.as_ref())?
        };

        let mut stack = scope.stack.to_vec();
        stack.push(key);
        let inner = ExpansionScope {
            stack: &stack,
            rewriter: rewriter.as_ref(),
        };

        let mut steps = Vec::with_capacity(group.tasks.len());
        for task in group.tasks.iter().filter(|task| task.enabled) {
            steps.extend(self.expand_in(&TaskInvocation::from(task), inner)?);
        }

        Ok(Template {
            key,
            file_stem: template_file_stem(&group.name, key.major),
            parameters,
            steps,
        })
    }

    fn cycle_error(&self, key: TaskGroupVersion, stack: &[TaskGroupVersion]) -> AppError {
        let start = stack.iter().position(|entry| *entry == key).unwrap_or(0);
        let chain = stack[start..]
            .iter()
            .chain(std::iter::once(&key))
            .map(|entry| match self.task_groups.get(entry) {
                Some(group) => format!("{} v{}", group.name, entry.major),
                None => entry.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" -> ");
        AppError::new(
            ErrorCategory::DataIntegrityError,
            format!("task group references itself: {}", chain),
        )
        .with_code(CODE_TASK_GROUP_CYCLE)
        .with_context("task_group", key.to_string())
        .with_suggestion("Break the cycle in the task group designer before converting")
    }
}
