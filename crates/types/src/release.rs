use crate::catalog::enabled_by_default;
use crate::VariableMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDefinition {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub variables: VariableMap,
    #[serde(default)]
    pub variable_groups: Vec<i64>,
    #[serde(default)]
    pub environments: Vec<ReleaseEnvironment>,
}

/// Deployment target of a release; becomes one stage.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseEnvironment {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub rank: i32,
    #[serde(default)]
    pub variables: VariableMap,
    #[serde(default)]
    pub variable_groups: Vec<i64>,
    #[serde(default)]
    pub deploy_phases: Vec<DeployPhase>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeployPhaseType {
    AgentBasedDeployment,
    RunOnServer,
    MachineGroupBasedDeployment,
    DeploymentGates,
    #[serde(other)]
    Undefined,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployPhase {
    pub name: String,
    #[serde(default)]
    pub rank: i32,
    pub phase_type: DeployPhaseType,
    #[serde(default)]
    pub deployment_input: DeploymentInput,
    #[serde(default)]
    pub workflow_tasks: Vec<WorkflowTask>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInput {
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub timeout_in_minutes: u32,
    #[serde(default)]
    pub job_cancel_timeout_in_minutes: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTask {
    pub task_id: Uuid,
    #[serde(default)]
    pub name: String,
    pub version: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub inputs: IndexMap<String, String>,
    #[serde(default)]
    pub environment: IndexMap<String, String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub continue_on_error: bool,
    #[serde(default)]
    pub timeout_in_minutes: u32,
}
