use super::inputs::{normalize_inputs, overlay_parameters, ParameterRewriter};
use super::model::{Step, TaskStep, TemplateStep};
use super::GenerationContext;
use crate::core::error::{AppError, CODE_INVALID_VERSION_SPEC};
use crate::core::source::TaskGroupVersion;
use crate::core::types::ErrorCategory;
use indexmap::IndexMap;
use uuid::Uuid;
use yamlforge_types::{BuildDefinitionStep, TaskGroupStep, WorkflowTask};

/// Borrowed view over the three upstream invocation shapes.
#[derive(Debug, Clone, Copy)]
pub struct TaskInvocation<'a> {
    pub task_id: Uuid,
    pub display_name: &'a str,
    pub version_spec: &'a str,
    pub inputs: &'a IndexMap<String, String>,
    pub environment: &'a IndexMap<String, String>,
    pub condition: Option<&'a str>,
    pub continue_on_error: bool,
    pub timeout_in_minutes: u32,
}

impl<'a> From<&'a BuildDefinitionStep> for TaskInvocation<'a> {
    fn from(step: &'a BuildDefinitionStep) -> Self {
        TaskInvocation {
            task_id: step.task.id,
            display_name: &step.display_name,
            version_spec: &step.task.version_spec,
            inputs: &step.inputs,
            environment: &step.environment,
            condition: step.condition.as_deref(),
            continue_on_error: step.continue_on_error,
            timeout_in_minutes: step.timeout_in_minutes,
        }
    }
}

impl<'a> From<&'a WorkflowTask> for TaskInvocation<'a> {
    fn from(task: &'a WorkflowTask) -> Self {
        TaskInvocation {
            task_id: task.task_id,
            display_name: &task.name,
            version_spec: &task.version,
            inputs: &task.inputs,
            environment: &task.environment,
            condition: task.condition.as_deref(),
            continue_on_error: task.continue_on_error,
            timeout_in_minutes: task.timeout_in_minutes,
        }
    }
}

impl<'a> From<&'a TaskGroupStep> for TaskInvocation<'a> {
    fn from(step: &'a TaskGroupStep) -> Self {
        TaskInvocation {
            task_id: step.task.id,
            display_name: &step.display_name,
            version_spec: &step.task.version_spec,
            inputs: &step.inputs,
            environment: &step.environment,
            condition: step.condition.as_deref(),
            continue_on_error: step.continue_on_error,
            timeout_in_minutes: step.timeout_in_minutes,
        }
    }
}

/// Where an expansion happens: the task groups currently being built, and the
/// parameter rewriter of the innermost one when references must be rewritten.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ExpansionScope<'s> {
    pub stack: &'s [TaskGroupVersion],
    pub rewriter: Option<&'s ParameterRewriter>,
}

/// Major version of a version spec such as `2.*`, `2` or `2.1.0`.
pub fn parse_major_version(version_spec: &str) -> Result<u32, AppError> {
    let normalized = version_spec.trim().replace(".*", ".0");
    let major = normalized.split('.').next().unwrap_or_default();
    major.parse::<u32>().map_err(|_| {
        AppError::new(
            ErrorCategory::DataIntegrityError,
            format!("version spec '{}' has no numeric major version", version_spec),
        )
        .with_code(CODE_INVALID_VERSION_SPEC)
        .with_context("version_spec", version_spec)
    })
}

/// A condition equivalent to the platform default is dropped.
pub(crate) fn step_condition(condition: Option<&str>) -> Option<String> {
    let condition = condition?;
    let trimmed = condition.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("succeeded()") {
        return None;
    }
    Some(condition.to_string())
}

impl GenerationContext {
    /// Expand one top-level invocation into the steps it contributes.
    pub fn expand_invocation(&self, invocation: &TaskInvocation<'_>) -> Result<Vec<Step>, AppError> {
        self.expand_in(invocation, ExpansionScope::default())
    }

    pub(crate) fn expand_in(
        &self,
        invocation: &TaskInvocation<'_>,
        scope: ExpansionScope<'_>,
    ) -> Result<Vec<Step>, AppError> {
        let major = parse_major_version(invocation.version_spec)?;

        if let Some(entry) = self.catalog.get(invocation.task_id, major) {
            let step = TaskStep {
                task: entry.task_reference(),
                display_name: invocation.display_name.to_string(),
                condition: step_condition(invocation.condition),
                continue_on_error: invocation.continue_on_error,
                timeout_in_minutes: invocation.timeout_in_minutes,
                env: (!invocation.environment.is_empty()).then(|| invocation.environment.clone()),
                inputs: normalize_inputs(invocation.inputs, &entry.inputs, scope.rewriter),
            };
            return Ok(vec![Step::Task(step)]);
        }

        let key = TaskGroupVersion::new(invocation.task_id, major);
        let template = self.template_for(key, scope)?;

        if self.settings.inline_task_groups {
            return Ok(template.steps.clone());
        }

        tracing::trace!(task_group = %key, template = %template.file_stem, "referencing template");
        Ok(vec![Step::Template(TemplateStep {
            template: template.reference_path(),
            parameters: overlay_parameters(
                template.parameters.as_ref(),
                invocation.inputs,
                scope.rewriter,
            ),
        })])
    }
}
