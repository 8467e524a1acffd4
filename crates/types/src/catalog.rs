use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Semantic version triple reported for installed tasks and task groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskVersion {
    pub major: u32,
    #[serde(default)]
    pub minor: u32,
    #[serde(default)]
    pub patch: u32,
}

/// One installed task at one major version.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    pub id: Uuid,
    pub name: String,
    /// Extension namespace for marketplace tasks; absent for built-in tasks.
    #[serde(default)]
    pub contribution_identifier: Option<String>,
    pub version: TaskVersion,
    #[serde(default)]
    pub inputs: Vec<TaskInputDefinition>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInputDefinition {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub default_value: Option<String>,
}

/// Reference from an invocation to a task or task group.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskReference {
    pub id: Uuid,
    pub version_spec: String,
}

/// Reusable composite of task invocations with its own declared inputs.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroup {
    pub id: Uuid,
    pub name: String,
    pub version: TaskVersion,
    #[serde(default)]
    pub inputs: Vec<TaskGroupInput>,
    #[serde(default)]
    pub tasks: Vec<TaskGroupStep>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroupInput {
    pub name: String,
    #[serde(default)]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroupStep {
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

pub(crate) fn enabled_by_default() -> bool {
    true
}
