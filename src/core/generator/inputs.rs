use super::model::Parameters;
use crate::core::error::AppError;
use crate::core::source::InputSpec;
use crate::core::types::ErrorCategory;
use indexmap::IndexMap;
use regex::{NoExpand, Regex};

/// Rewrites legacy `$(name)` and `variables['name']` references to template
/// parameter expressions, one compiled pattern per declared parameter.
#[derive(Debug, Clone)]
pub struct ParameterRewriter {
    rules: Vec<(Regex, String)>,
}

impl ParameterRewriter {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, AppError> {
        let mut rules = Vec::new();
        for name in names {
            let escaped = regex::escape(name);
            let pattern = format!(r"(?i)\$\({escaped}\)|variables\['{escaped}'\]");
            let regex = Regex::new(&pattern).map_err(|e| {
                AppError::new(
                    ErrorCategory::InternalError,
                    format!("failed to compile parameter pattern for '{}'", name),
                )
                .with_context("parameter", name)
                .with_context("reason", e.to_string())
            })?;
            rules.push((regex, format!("${{{{ parameters.{} }}}}", name)));
        }
        Ok(ParameterRewriter { rules })
    }

    pub fn from_parameters(parameters: Option<&Parameters>) -> Result<Option<Self>, AppError> {
        match parameters {
            Some(params) if !params.is_empty() => {
                Self::new(params.keys().map(String::as_str)).map(Some)
            }
            _ => Ok(None),
        }
    }

    pub fn rewrite(&self, value: &str) -> String {
        if value.trim().is_empty() {
            return value.to_string();
        }
        let mut rewritten = value.to_string();
        for (regex, replacement) in &self.rules {
            if regex.is_match(&rewritten) {
                rewritten = regex
                    .replace_all(&rewritten, NoExpand(replacement))
                    .into_owned();
            }
        }
        rewritten
    }
}

/// First and last lines fully trimmed, interior lines right-trimmed.
pub fn multiline_trim(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    let lines: Vec<&str> = value.split('\n').collect();
    let last = lines.len() - 1;
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || i == last {
                line.trim()
            } else {
                line.trim_end()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Filter and reshape the raw inputs of a direct task step.
///
/// Keys unknown to the task and values equal to the declared default are
/// dropped. Remaining values are trimmed, optionally rewritten to parameter
/// expressions, and re-keyed to the input's primary alias.
pub fn normalize_inputs(
    raw: &IndexMap<String, String>,
    known: &IndexMap<String, InputSpec>,
    rewriter: Option<&ParameterRewriter>,
) -> Option<IndexMap<String, String>> {
    let mut normalized = IndexMap::with_capacity(raw.len());
    for (key, value) in raw {
        let Some(spec) = known.get(key) else {
            continue;
        };
        if spec.default_value.as_deref() == Some(value.as_str()) {
            continue;
        }
        let mut value = multiline_trim(value);
        if let Some(rewriter) = rewriter {
            value = rewriter.rewrite(&value);
        }
        normalized.insert(spec.emitted_key().to_string(), value);
    }
    (!normalized.is_empty()).then_some(normalized)
}

/// Parameters for a template reference: the caller's inputs in caller order,
/// restricted to parameters the callee declares (matched case-insensitively)
/// and re-keyed to the declared name. A blank caller value falls back to the
/// declared default; parameters the caller left out are never added.
pub fn overlay_parameters(
    declared: Option<&Parameters>,
    caller: &IndexMap<String, String>,
    rewriter: Option<&ParameterRewriter>,
) -> Option<IndexMap<String, String>> {
    let declared = declared?;
    let mut overlaid = IndexMap::with_capacity(caller.len());
    for (key, value) in caller {
        let Some((name, default_value)) = declared
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
        else {
            continue;
        };
        let value = if value.trim().is_empty() {
            match default_value.as_deref().filter(|d| !d.trim().is_empty()) {
                Some(default_value) => default_value.to_string(),
                None => continue,
            }
        } else {
            match rewriter {
                Some(rewriter) => rewriter.rewrite(value),
                None => value.clone(),
            }
        };
        overlaid.insert(name.clone(), value);
    }
    (!overlaid.is_empty()).then_some(overlaid)
}
