//! Upstream records exported by the host platform: designer build definitions,
//! release definitions, the installed task catalog, task groups and variable
//! groups. Field names follow the platform's camelCase REST payloads.

pub mod build;
pub mod catalog;
pub mod release;

pub use build::{
    AgentQueue, BuildDefinition, BuildDefinitionStep, BuildPhase, BuildProcess, BuildTrigger,
    ContinuousIntegrationTrigger, PhaseTarget, VariableGroupReference,
};
pub use catalog::{
    TaskDefinition, TaskGroup, TaskGroupInput, TaskGroupStep, TaskInputDefinition, TaskReference,
    TaskVersion,
};
pub use release::{
    DeployPhase, DeployPhaseType, DeploymentInput, ReleaseDefinition, ReleaseEnvironment,
    WorkflowTask,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A full export of one project, as handed over by a definition source.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub project: String,
    #[serde(default)]
    pub build_definitions: Vec<BuildDefinition>,
    #[serde(default)]
    pub release_definitions: Vec<ReleaseDefinition>,
    #[serde(default)]
    pub tasks: Vec<TaskDefinition>,
    #[serde(default)]
    pub task_groups: Vec<TaskGroup>,
    #[serde(default)]
    pub variable_groups: Vec<VariableGroup>,
}

/// Inline variable declared on a definition, environment or variable group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionVariable {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub is_secret: bool,
}

/// Ordered name to variable map, as declared in the designer.
pub type VariableMap = IndexMap<String, DefinitionVariable>;

/// Project-scoped, named set of variables referenced by id.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub variables: VariableMap,
}
