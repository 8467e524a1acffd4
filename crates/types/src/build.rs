use crate::catalog::{enabled_by_default, TaskReference};
use crate::VariableMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Process type the platform assigns to designer (non-YAML) builds.
pub const DESIGNER_PROCESS_TYPE: i32 = 1;

/// Phase target type for phases that run on an agent.
pub const AGENT_PHASE_TARGET_TYPE: i32 = 1;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDefinition {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub build_number_format: Option<String>,
    #[serde(default)]
    pub queue: Option<AgentQueue>,
    #[serde(default)]
    pub triggers: Vec<BuildTrigger>,
    #[serde(default)]
    pub variables: VariableMap,
    #[serde(default)]
    pub variable_groups: Vec<VariableGroupReference>,
    #[serde(default)]
    pub process: Option<BuildProcess>,
}

impl BuildDefinition {
    /// Designer phases, or `None` when the definition uses another process type.
    pub fn designer_phases(&self) -> Option<&[BuildPhase]> {
        self.process
            .as_ref()
            .filter(|process| process.process_type == DESIGNER_PROCESS_TYPE)
            .map(|process| process.phases.as_slice())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentQueue {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableGroupReference {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "triggerType", rename_all = "camelCase")]
pub enum BuildTrigger {
    ContinuousIntegration(ContinuousIntegrationTrigger),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuousIntegrationTrigger {
    #[serde(default)]
    pub branch_filters: Vec<String>,
    #[serde(default)]
    pub path_filters: Vec<String>,
    #[serde(default)]
    pub batch_changes: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildProcess {
    #[serde(rename = "type")]
    pub process_type: i32,
    #[serde(default)]
    pub phases: Vec<BuildPhase>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPhase {
    pub name: String,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub job_timeout_in_minutes: u32,
    #[serde(default)]
    pub job_cancel_timeout_in_minutes: u32,
    #[serde(default)]
    pub target: Option<PhaseTarget>,
    #[serde(default)]
    pub steps: Vec<BuildDefinitionStep>,
}

impl BuildPhase {
    pub fn runs_on_agent(&self) -> bool {
        self.target
            .as_ref()
            .is_some_and(|target| target.target_type == AGENT_PHASE_TARGET_TYPE)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTarget {
    #[serde(rename = "type")]
    pub target_type: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDefinitionStep {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub display_name: String,
    pub task: TaskReference,
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
