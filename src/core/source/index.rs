//! Read-only lookups built once per run from the raw snapshot records.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;
use yamlforge_types::{TaskDefinition, TaskGroup, VariableGroup};

/// Value identity of a task group expansion: the group id plus its major version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskGroupVersion {
    pub group_id: Uuid,
    pub major: u32,
}

impl TaskGroupVersion {
    pub fn new(group_id: Uuid, major: u32) -> Self {
        Self { group_id, major }
    }
}

impl fmt::Display for TaskGroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.group_id, self.major)
    }
}

/// Declared input of an installed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    pub name: String,
    pub aliases: Vec<String>,
    pub default_value: Option<String>,
}

impl InputSpec {
    /// Key the input is emitted under: the first alias when one exists.
    pub fn emitted_key(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or(&self.name)
    }
}

/// One installed task at one major version.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub id: Uuid,
    pub major: u32,
    pub name: String,
    pub namespace: Option<String>,
    pub inputs: IndexMap<String, InputSpec>,
}

impl CatalogEntry {
    /// Reference string used by a step: `name@major` or `namespace.name@major`.
    pub fn task_reference(&self) -> String {
        match self.namespace.as_deref().filter(|ns| !ns.trim().is_empty()) {
            Some(namespace) => format!("{}.{}@{}", namespace, self.name, self.major),
            None => format!("{}@{}", self.name, self.major),
        }
    }
}

impl From<&TaskDefinition> for CatalogEntry {
    fn from(task: &TaskDefinition) -> Self {
        let inputs = task
            .inputs
            .iter()
            .map(|input| {
                (
                    input.name.clone(),
                    InputSpec {
                        name: input.name.clone(),
                        aliases: input.aliases.clone(),
                        default_value: input.default_value.clone(),
                    },
                )
            })
            .collect();
        CatalogEntry {
            id: task.id,
            major: task.version.major,
            name: task.name.clone(),
            namespace: task.contribution_identifier.clone(),
            inputs,
        }
    }
}

/// Installed tasks keyed by task id, then major version.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<Uuid, HashMap<u32, CatalogEntry>>,
}

impl Catalog {
    pub fn from_tasks(tasks: &[TaskDefinition]) -> Self {
        let mut catalog = Catalog::default();
        for task in tasks {
            catalog.insert(CatalogEntry::from(task));
        }
        catalog
    }

    /// Insert an entry; a duplicate (id, major) keeps the first one seen.
    pub fn insert(&mut self, entry: CatalogEntry) -> bool {
        let versions = self.entries.entry(entry.id).or_default();
        if versions.contains_key(&entry.major) {
            tracing::warn!(
                task_id = %entry.id,
                major = entry.major,
                name = %entry.name,
                "duplicate catalog entry ignored; the task is probably installed twice"
            );
            return false;
        }
        versions.insert(entry.major, entry);
        true
    }

    pub fn get(&self, id: Uuid, major: u32) -> Option<&CatalogEntry> {
        self.entries.get(&id).and_then(|versions| versions.get(&major))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Task groups keyed by (group id, major version).
#[derive(Debug, Clone, Default)]
pub struct TaskGroupMap {
    groups: HashMap<TaskGroupVersion, TaskGroup>,
}

impl TaskGroupMap {
    pub fn from_groups(groups: &[TaskGroup]) -> Self {
        let mut map = HashMap::with_capacity(groups.len());
        for group in groups {
            let key = TaskGroupVersion::new(group.id, group.version.major);
            if map.insert(key, group.clone()).is_some() {
                tracing::warn!(task_group = %key, "duplicate task group version, keeping the last one");
            }
        }
        TaskGroupMap { groups: map }
    }

    pub fn get(&self, key: &TaskGroupVersion) -> Option<&TaskGroup> {
        self.groups.get(key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Project variable groups keyed by id.
#[derive(Debug, Clone, Default)]
pub struct VariableGroupMap {
    groups: HashMap<i64, VariableGroup>,
}

impl VariableGroupMap {
    pub fn from_groups(groups: &[VariableGroup]) -> Self {
        VariableGroupMap {
            groups: groups.iter().map(|group| (group.id, group.clone())).collect(),
        }
    }

    pub fn get(&self, id: i64) -> Option<&VariableGroup> {
        self.groups.get(&id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
