//! Output document model. Field order here is the key order of the emitted YAML.

use crate::core::source::TaskGroupVersion;
use crate::utils::sanitize_name;
use indexmap::IndexMap;
use serde::Serialize;

/// Folder, relative to the output root, that holds task group templates.
pub const TEMPLATES_FOLDER: &str = "AzureDevOpsTaskGroups";

/// Declared parameter name to default value.
pub type Parameters = IndexMap<String, Option<String>>;

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// Root document produced for one definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pipeline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Trigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<Pool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<Variable>>,
    #[serde(flatten)]
    pub body: PipelineBody,
}

impl Pipeline {
    pub fn new(body: PipelineBody) -> Self {
        Pipeline {
            name: None,
            parameters: None,
            trigger: None,
            pool: None,
            variables: None,
            body,
        }
    }
}

/// Exactly one populated content list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PipelineBody {
    Stages(Vec<Stage>),
    Jobs(Vec<Job>),
    Steps(Vec<Step>),
}

impl PipelineBody {
    pub fn len(&self) -> usize {
        match self {
            PipelineBody::Stages(stages) => stages.len(),
            PipelineBody::Jobs(jobs) => jobs.len(),
            PipelineBody::Steps(steps) => steps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trigger {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<IncludeExclude>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<IncludeExclude>,
    #[serde(skip_serializing_if = "is_false")]
    pub batch: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IncludeExclude {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pool {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Variable {
    Group {
        group: String,
    },
    Named {
        name: String,
        value: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<Variable>>,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub job: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub timeout_in_minutes: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub cancel_timeout_in_minutes: u32,
    pub steps: Vec<Step>,
}

/// A direct task invocation or a reference to a template file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Step {
    Task(TaskStep),
    Template(TemplateStep),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStep {
    pub task: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub continue_on_error: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub timeout_in_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateStep {
    pub template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<IndexMap<String, String>>,
}

/// Materialized expansion of one task group version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    #[serde(skip)]
    pub key: TaskGroupVersion,
    #[serde(skip)]
    pub file_stem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
    pub steps: Vec<Step>,
}

impl Template {
    /// Names of declared parameters, in declaration order.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters
            .as_ref()
            .map(|params| params.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn file_name(&self) -> String {
        format!("{}.yml", self.file_stem)
    }

    /// Path a referencing step uses, relative to the pipeline file.
    pub fn reference_path(&self) -> String {
        format!("../{}/{}", TEMPLATES_FOLDER, self.file_name())
    }
}

/// `<sanitized-group-name>-v<major>`
pub fn template_file_stem(group_name: &str, major: u32) -> String {
    format!("{}-v{}", sanitize_name(group_name), major)
}
