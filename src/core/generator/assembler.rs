use super::expander::TaskInvocation;
use super::model::{Job, Pipeline, PipelineBody, Pool, Stage, Step};
use super::trigger::translate_triggers;
use super::variables::{build_variables, release_variables};
use super::GenerationContext;
use crate::core::error::AppError;
use crate::core::source::Definition;
use crate::utils::sanitize_identifier;
use yamlforge_types::{
    BuildDefinition, BuildPhase, DeployPhase, DeployPhaseType, ReleaseDefinition,
    ReleaseEnvironment,
};

/// Job-level settings shared by build phases and deploy phases.
struct PhasePlan<'a> {
    name: &'a str,
    condition: Option<&'a str>,
    timeout_in_minutes: u32,
    cancel_timeout_in_minutes: u32,
    invocations: Vec<TaskInvocation<'a>>,
}

impl<'a> From<&'a BuildPhase> for PhasePlan<'a> {
    fn from(phase: &'a BuildPhase) -> Self {
        PhasePlan {
            name: &phase.name,
            condition: phase.condition.as_deref(),
            timeout_in_minutes: phase.job_timeout_in_minutes,
            cancel_timeout_in_minutes: phase.job_cancel_timeout_in_minutes,
            invocations: phase
                .steps
                .iter()
                .filter(|step| step.enabled)
                .map(TaskInvocation::from)
                .collect(),
        }
    }
}

impl<'a> From<&'a DeployPhase> for PhasePlan<'a> {
    fn from(phase: &'a DeployPhase) -> Self {
        PhasePlan {
            name: &phase.name,
            condition: phase.deployment_input.condition.as_deref(),
            timeout_in_minutes: phase.deployment_input.timeout_in_minutes,
            cancel_timeout_in_minutes: phase.deployment_input.job_cancel_timeout_in_minutes,
            invocations: phase
                .workflow_tasks
                .iter()
                .filter(|task| task.enabled)
                .map(TaskInvocation::from)
                .collect(),
        }
    }
}

/// Jobs always carry an explicit condition; a blank one means the default.
fn job_condition(condition: Option<&str>) -> String {
    match condition.map(str::trim) {
        Some(condition) if !condition.is_empty() => condition.to_string(),
        _ => "succeeded()".to_string(),
    }
}

impl GenerationContext {
    /// Build the pipeline document for one definition.
    pub fn assemble(&self, definition: &Definition) -> Result<Pipeline, AppError> {
        let subject = format!(
            "{} {} '{}'",
            definition.kind(),
            definition.id(),
            definition.name()
        );
        let result = match definition {
            Definition::Build(build) => self.assemble_build(build),
            Definition::Release(release) => self.assemble_release(release),
        };
        result
            .and_then(|pipeline| pipeline.ok_or_else(|| AppError::empty_result(&subject)))
            .map_err(|error| {
                error
                    .with_context("definition_kind", definition.kind().to_string())
                    .with_context("definition_id", definition.id().to_string())
                    .with_context("definition_name", definition.name())
            })
    }

    fn assemble_build(&self, build: &BuildDefinition) -> Result<Option<Pipeline>, AppError> {
        let phases = build
            .designer_phases()
            .unwrap_or_default()
            .iter()
            .filter(|phase| phase.runs_on_agent())
            .map(PhasePlan::from);
        let jobs = self.chain_jobs(phases)?;
        if jobs.is_empty() {
            return Ok(None);
        }

        let mut pipeline = Pipeline::new(collapse_jobs(jobs));
        pipeline.name = build
            .build_number_format
            .clone()
            .filter(|format| !format.trim().is_empty());
        pipeline.trigger = translate_triggers(&build.triggers);
        pipeline.pool = build.queue.as_ref().map(|queue| Pool {
            name: queue.name.clone(),
        });
        pipeline.variables = build_variables(build, &self.variable_groups);
        Ok(Some(pipeline))
    }

    fn assemble_release(&self, release: &ReleaseDefinition) -> Result<Option<Pipeline>, AppError> {
        let mut stages = Vec::with_capacity(release.environments.len());
        for environment in &release.environments {
            if let Some(stage) = self.release_stage(release, environment)? {
                stages.push(stage);
            }
        }

        let mut variables = release_variables(release, None, &self.variable_groups);
        let body = match stages.len() {
            0 => return Ok(None),
            1 => {
                let stage = stages.remove(0);
                // The stage scope disappears; its variables move to the root after the release's own.
                if let Some(stage_variables) = stage.variables {
                    variables
                        .get_or_insert_with(Vec::new)
                        .extend(stage_variables);
                }
                collapse_jobs(stage.jobs)
            }
            _ => PipelineBody::Stages(stages),
        };

        let mut pipeline = Pipeline::new(body);
        pipeline.variables = variables;
        Ok(Some(pipeline))
    }

    fn release_stage(
        &self,
        release: &ReleaseDefinition,
        environment: &ReleaseEnvironment,
    ) -> Result<Option<Stage>, AppError> {
        let mut deploy_phases: Vec<&DeployPhase> = environment
            .deploy_phases
            .iter()
            .filter(|phase| phase.phase_type == DeployPhaseType::AgentBasedDeployment)
            .collect();
        deploy_phases.sort_by_key(|phase| phase.rank);

        let jobs = self.chain_jobs(deploy_phases.into_iter().map(PhasePlan::from))?;
        if jobs.is_empty() {
            tracing::debug!(
                release = %release.name,
                environment = %environment.name,
                "environment has no enabled agent steps, skipping stage"
            );
            return Ok(None);
        }

        Ok(Some(Stage {
            stage: sanitize_identifier(&environment.name),
            display_name: Some(release.name.clone()),
            variables: release_variables(release, Some(environment), &self.variable_groups),
            jobs,
        }))
    }

    /// One job per phase with steps; each depends on the previous emitted job.
    fn chain_jobs<'a>(
        &self,
        phases: impl Iterator<Item = PhasePlan<'a>>,
    ) -> Result<Vec<Job>, AppError> {
        let mut jobs: Vec<Job> = Vec::new();
        for phase in phases {
            let mut steps: Vec<Step> = Vec::with_capacity(phase.invocations.len());
            for invocation in &phase.invocations {
                steps.extend(self.expand_invocation(invocation)?);
            }
            if steps.is_empty() {
                continue;
            }
            jobs.push(Job {
                job: sanitize_identifier(phase.name),
                display_name: Some(phase.name.to_string()),
                depends_on: jobs.last().map(|previous| previous.job.clone()),
                condition: Some(job_condition(phase.condition)),
                timeout_in_minutes: phase.timeout_in_minutes,
                cancel_timeout_in_minutes: phase.cancel_timeout_in_minutes,
                steps,
            });
        }
        Ok(jobs)
    }
}

fn collapse_jobs(mut jobs: Vec<Job>) -> PipelineBody {
    if jobs.len() == 1 {
        PipelineBody::Steps(jobs.remove(0).steps)
    } else {
        PipelineBody::Jobs(jobs)
    }
}
