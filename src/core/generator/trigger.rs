use super::model::{IncludeExclude, Trigger};
use yamlforge_types::{BuildTrigger, ContinuousIntegrationTrigger};

const BRANCH_PREFIX: &str = "refs/heads/";

/// Translate the first continuous-integration trigger, if any.
pub fn translate_triggers(triggers: &[BuildTrigger]) -> Option<Trigger> {
    triggers.iter().find_map(|trigger| match trigger {
        BuildTrigger::ContinuousIntegration(ci) => Some(translate_ci(ci)),
        BuildTrigger::Other => None,
    })
}

fn translate_ci(ci: &ContinuousIntegrationTrigger) -> Trigger {
    Trigger {
        branches: bucket(ci.branch_filters.iter().filter_map(|filter| {
            let (include, rest) = split_polarity(filter)?;
            Some((include, rest.strip_prefix(BRANCH_PREFIX).unwrap_or(rest)))
        })),
        paths: bucket(ci.path_filters.iter().filter_map(|filter| {
            let chars: Vec<char> = filter.chars().collect();
            // "+/" and "-/" mean the whole repository
            if chars.len() == 2 && chars[1] == '/' {
                return None;
            }
            let (include, rest) = split_polarity(filter)?;
            let rest = match filter.as_bytes()[0] {
                b'+' | b'-' => rest.strip_prefix('/').unwrap_or(rest),
                _ => rest,
            };
            Some((include, rest))
        })),
        batch: ci.batch_changes,
    }
}

/// `+` includes; any other leading character excludes.
fn split_polarity(filter: &str) -> Option<(bool, &str)> {
    let mut chars = filter.chars();
    let polarity = chars.next()?;
    Some((polarity == '+', chars.as_str()))
}

fn bucket<'a>(filters: impl Iterator<Item = (bool, &'a str)>) -> Option<IncludeExclude> {
    let mut set = IncludeExclude::default();
    let mut seen_any = false;
    for (include, value) in filters {
        seen_any = true;
        if include {
            set.include.push(value.to_string());
        } else {
            set.exclude.push(value.to_string());
        }
    }
    seen_any.then_some(set)
}
