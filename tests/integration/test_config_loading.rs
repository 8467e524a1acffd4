use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use yamlforge::core::config::{loader::CONFIG_FILE_NAME, ConfigLoader, YamlforgeConfig};

const ENV_VARS: &[&str] = &[
    "YAMLFORGE_INLINE_TASK_GROUPS",
    "YAMLFORGE_PARALLEL",
    "YAMLFORGE_PARALLEL_LIMIT",
    "YAMLFORGE_OUTPUT_PATH",
    "YAMLFORGE_FILTER",
];

fn clear_yamlforge_env() {
    for v in ENV_VARS {
        env::remove_var(v);
    }
}

/// Test integration of config loading from a workspace file
#[test]
#[serial]
fn test_config_loading_integration() {
    clear_yamlforge_env();
    let temp_dir = TempDir::new().unwrap();
    let workspace_path = temp_dir.path();

    let config_content = r#"
[generation]
inline_task_groups = true
parallel = true
parallel_limit = 6

[output]
path = "generated"
filter = "release"
"#;
    fs::write(workspace_path.join(CONFIG_FILE_NAME), config_content).unwrap();

    let config = ConfigLoader::load_from_workspace(workspace_path).unwrap();

    assert!(config.generation.inline_task_groups);
    assert_eq!(config.generation.parallel_limit, Some(6));
    assert_eq!(config.output.path, PathBuf::from("generated"));
    assert_eq!(config.output.filter.as_deref(), Some("release"));
    assert_eq!(config.effective_parallel_limit(), 6);
    assert!(ConfigLoader::validate_config(&config).is_ok());
}

/// Test environment variable precedence over config file
#[test]
#[serial]
fn test_env_precedence_integration() {
    clear_yamlforge_env();
    let temp_dir = TempDir::new().unwrap();
    let workspace_path = temp_dir.path();

    let config_content = r#"
[generation]
inline_task_groups = false
parallel = true
parallel_limit = 2

[output]
path = "from-file"
filter = "file-filter"
"#;
    fs::write(workspace_path.join(CONFIG_FILE_NAME), config_content).unwrap();

    env::set_var("YAMLFORGE_INLINE_TASK_GROUPS", "true");
    env::set_var("YAMLFORGE_PARALLEL", "false");
    env::set_var("YAMLFORGE_PARALLEL_LIMIT", "9");
    env::set_var("YAMLFORGE_OUTPUT_PATH", "from-env");
    env::set_var("YAMLFORGE_FILTER", "env-filter");

    let config = ConfigLoader::load_from_workspace(workspace_path).unwrap();

    assert!(config.generation.inline_task_groups);
    assert!(!config.generation.parallel);
    assert_eq!(config.generation.parallel_limit, Some(9));
    assert_eq!(config.effective_parallel_limit(), 1);
    assert_eq!(config.output.path, PathBuf::from("from-env"));
    assert_eq!(config.output.filter.as_deref(), Some("env-filter"));

    clear_yamlforge_env();
}

/// Test config loading without file (defaults + env vars)
#[test]
#[serial]
fn test_config_loading_without_file() {
    clear_yamlforge_env();
    let temp_dir = TempDir::new().unwrap();

    env::set_var("YAMLFORGE_FILTER", "nightly");
    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();

    assert_eq!(config.output.filter.as_deref(), Some("nightly"));
    assert_eq!(config.output.path, PathBuf::from("."));
    assert!(config.generation.parallel);
    assert!(!config.generation.inline_task_groups);

    clear_yamlforge_env();
}

/// Unparseable env values leave the file value in place
#[test]
#[serial]
fn test_invalid_env_values_are_ignored() {
    clear_yamlforge_env();
    let temp_dir = TempDir::new().unwrap();
    env::set_var("YAMLFORGE_PARALLEL", "sometimes");
    env::set_var("YAMLFORGE_PARALLEL_LIMIT", "many");

    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
    assert_eq!(config, YamlforgeConfig::default());

    clear_yamlforge_env();
}

#[test]
#[serial]
fn test_malformed_config_file() {
    clear_yamlforge_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    fs::write(&path, "[generation\nparallel = ").unwrap();

    let error = ConfigLoader::load(&path).unwrap_err();
    assert_eq!(error.code, "CFG-002");
}

#[test]
#[serial]
fn test_zero_parallel_limit_fails_validation() {
    clear_yamlforge_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        "[generation]\nparallel_limit = 0\n",
    )
    .unwrap();

    let config = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap();
    let error = ConfigLoader::validate_config(&config).unwrap_err();
    assert_eq!(error.code, "CFG-004");
    assert!(!error.recovery_suggestions.is_empty());
}

#[test]
fn test_env_documentation_covers_every_variable() {
    let docs = ConfigLoader::env_var_documentation();
    for var in ENV_VARS {
        assert!(
            docs.iter().any(|line| line.starts_with(var)),
            "{var} is undocumented"
        );
    }
}
