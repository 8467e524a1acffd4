use super::model::Variable;
use crate::core::source::VariableGroupMap;
use yamlforge_types::{BuildDefinition, ReleaseDefinition, ReleaseEnvironment, VariableMap};

pub fn build_variables(build: &BuildDefinition, lookup: &VariableGroupMap) -> Option<Vec<Variable>> {
    let group_ids: Vec<i64> = build.variable_groups.iter().map(|group| group.id).collect();
    resolve(&group_ids, &build.variables, lookup)
}

/// Variables of `environment` when given, otherwise of the release root.
pub fn release_variables(
    release: &ReleaseDefinition,
    environment: Option<&ReleaseEnvironment>,
    lookup: &VariableGroupMap,
) -> Option<Vec<Variable>> {
    match environment {
        Some(environment) => resolve(&environment.variable_groups, &environment.variables, lookup),
        None => resolve(&release.variable_groups, &release.variables, lookup),
    }
}

fn resolve(group_ids: &[i64], inline: &VariableMap, lookup: &VariableGroupMap) -> Option<Vec<Variable>> {
    let mut variables = Vec::with_capacity(group_ids.len() + inline.len());
    for id in group_ids {
        match lookup.get(*id) {
            Some(group) => variables.push(Variable::Group {
                group: group.name.clone(),
            }),
            None => tracing::debug!(variable_group = id, "variable group not found in project, skipping"),
        }
    }
    variables.extend(inline.iter().map(|(name, variable)| Variable::Named {
        name: name.clone(),
        value: variable.value.clone(),
    }));
    (!variables.is_empty()).then_some(variables)
}
