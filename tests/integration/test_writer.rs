use indexmap::IndexMap;
use serde_json::json;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use yamlforge::core::generator::{GenerationContext, GenerationSettings};
use yamlforge::core::orchestrator::DefinitionOrchestrator;
use yamlforge::core::source::snapshot::index_snapshot;
use yamlforge::core::writer::{YamlWriter, BUILDS_FOLDER, RELEASES_FOLDER};
use yamlforge::core::GenerationReport;
use yamlforge_types::ProjectSnapshot;

const BASH: &str = "6c731c3c-3c68-459a-a5c9-bde6e6595b5b";
const NOTIFY_GROUP: &str = "5d1c0c52-7f5b-4f3c-9d59-0000000000aa";

async fn generate(inline: bool) -> (GenerationReport, String) {
    let snapshot: ProjectSnapshot = serde_json::from_value(json!({
        "project": "Payments",
        "buildDefinitions": [{
            "id": 4,
            "name": "CI: main",
            "process": { "type": 1, "phases": [{
                "name": "Agent job 1",
                "target": { "type": 1 },
                "steps": [
                    { "displayName": "Script", "task": { "id": BASH, "versionSpec": "3.*" },
                      "inputs": { "script": "  set -e\n  make build  \n  make test  " } },
                    { "displayName": "Notify", "task": { "id": NOTIFY_GROUP, "versionSpec": "2.*" },
                      "inputs": { "Channel": "#builds" } }
                ]
            }]}
        }],
        "releaseDefinitions": [{
            "id": 8,
            "name": "Web",
            "environments": [{
                "name": "Prod",
                "deployPhases": [{
                    "name": "Agent job",
                    "phaseType": "agentBasedDeployment",
                    "workflowTasks": [ { "taskId": BASH, "name": "Deploy", "version": "3.*",
                                         "inputs": { "script": "deploy" } } ]
                }]
            }]
        }],
        "tasks": [{
            "id": BASH,
            "name": "Bash",
            "version": { "major": 3 },
            "inputs": [ { "name": "script" } ]
        }],
        "taskGroups": [{
            "id": NOTIFY_GROUP,
            "name": "Notify Team",
            "version": { "major": 2 },
            "inputs": [ { "name": "Channel" } ],
            "tasks": [ { "task": { "id": BASH, "versionSpec": "3" },
                         "inputs": { "script": "notify $(Channel)" } } ]
        }]
    }))
    .unwrap();
    let mut data = index_snapshot(snapshot).unwrap();
    let definitions = std::mem::take(&mut data.definitions);
    let context = Arc::new(GenerationContext::from_source(
        &mut data,
        GenerationSettings {
            inline_task_groups: inline,
        },
    ));
    let report = DefinitionOrchestrator::new(context).run(definitions).await;
    (report, data.project)
}

#[tokio::test]
async fn test_output_layout() {
    let (mut report, project) = generate(false).await;
    let out = TempDir::new().unwrap();
    let writer = YamlWriter::new(out.path(), &project);

    let written = writer.write_report(&mut report);
    assert_eq!(written, 3);
    assert_eq!(report.files_written, 3);
    assert!(!report.has_failures());

    let root = out.path().join("Payments");
    assert_eq!(writer.root(), root.as_path());
    assert!(root.join(BUILDS_FOLDER).join("CI main-4.yml").is_file());
    assert!(root.join(RELEASES_FOLDER).join("Web-8.yml").is_file());
    let template = root.join("AzureDevOpsTaskGroups").join("Notify Team-v2.yml");
    assert!(template.is_file());

    let template_text = fs::read_to_string(template).unwrap();
    assert!(template_text.contains("parameters:"));
    assert!(template_text.contains("${{ parameters.Channel }}"));

    let build_text = fs::read_to_string(root.join(BUILDS_FOLDER).join("CI main-4.yml")).unwrap();
    assert!(build_text.contains("template: ../AzureDevOpsTaskGroups/Notify Team-v2.yml"));
}

#[tokio::test]
async fn test_multiline_inputs_survive_a_round_trip() {
    let (mut report, project) = generate(false).await;
    let out = TempDir::new().unwrap();
    YamlWriter::new(out.path(), &project).write_report(&mut report);

    let path = out
        .path()
        .join("Payments")
        .join(BUILDS_FOLDER)
        .join("CI main-4.yml");
    let text = fs::read_to_string(&path).unwrap();
    let document: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
    let inputs: IndexMap<String, String> =
        serde_yaml::from_value(document["steps"][0]["inputs"].clone()).unwrap();
    assert_eq!(inputs["script"], "set -e\n  make build\nmake test");
}

#[tokio::test]
async fn test_inline_mode_writes_no_templates() {
    let (mut report, project) = generate(true).await;
    let out = TempDir::new().unwrap();
    let output = out.path().join("payments");
    let writer = YamlWriter::new(&output, &project);

    assert!(report.templates.is_empty());
    let written = writer.write_report(&mut report);
    assert_eq!(written, 2);
    assert_eq!(writer.root(), output.as_path());
    assert!(!output.join("AzureDevOpsTaskGroups").exists());

    let build_text = fs::read_to_string(output.join(BUILDS_FOLDER).join("CI main-4.yml")).unwrap();
    assert!(build_text.contains("notify $(Channel)"));
    assert!(!build_text.contains("template:"));
}

#[tokio::test]
async fn test_write_failure_is_recorded() {
    let (mut report, project) = generate(false).await;
    let out = TempDir::new().unwrap();
    let root = out.path().join("Payments");
    fs::create_dir_all(&root).unwrap();
    // A file where the builds folder should be blocks that one write.
    fs::write(root.join(BUILDS_FOLDER), "not a folder").unwrap();

    assert_eq!(report.processed(), 2);
    let written = YamlWriter::new(out.path(), &project).write_report(&mut report);
    assert_eq!(written, 2);
    assert_eq!(report.processed(), 2);
    assert!(report.failures.is_empty());
    assert_eq!(report.write_failures.len(), 1);
    assert_eq!(report.write_failures[0].error.code, "GEN-WRITE-001");
    assert_eq!(report.write_failures[0].definition.id, "4");
    assert!(report.has_failures());
}
