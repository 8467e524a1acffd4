use serde_json::{json, Value};
use yamlforge::core::error::{CODE_EMPTY_RESULT, CODE_UNKNOWN_TASK};
use yamlforge::core::generator::{
    GenerationContext, GenerationSettings, PipelineBody, Step, Variable,
};
use yamlforge::core::source::snapshot::index_snapshot;
use yamlforge::core::source::Definition;
use yamlforge::core::{ErrorCategory, ErrorSeverity};
use yamlforge_types::ProjectSnapshot;

const BASH: &str = "6c731c3c-3c68-459a-a5c9-bde6e6595b5b";

fn step(name: &str, script: &str) -> Value {
    json!({
        "displayName": name,
        "task": { "id": BASH, "versionSpec": "3.*" },
        "inputs": { "script": script }
    })
}

fn workflow_task(name: &str, script: &str) -> Value {
    json!({
        "taskId": BASH,
        "name": name,
        "version": "3.*",
        "inputs": { "script": script }
    })
}

fn agent_phase(name: &str, steps: Vec<Value>) -> Value {
    json!({ "name": name, "target": { "type": 1 }, "steps": steps })
}

fn deploy_phase(name: &str, rank: i32, phase_type: &str, tasks: Vec<Value>) -> Value {
    json!({
        "name": name,
        "rank": rank,
        "phaseType": phase_type,
        "workflowTasks": tasks
    })
}

fn load(builds: Vec<Value>, releases: Vec<Value>) -> (GenerationContext, Vec<Definition>) {
    let snapshot: ProjectSnapshot = serde_json::from_value(json!({
        "project": "Payments",
        "buildDefinitions": builds,
        "releaseDefinitions": releases,
        "tasks": [{
            "id": BASH,
            "name": "Bash",
            "version": { "major": 3 },
            "inputs": [ { "name": "script" } ]
        }],
        "variableGroups": [ { "id": 7, "name": "shared-secrets" } ]
    }))
    .unwrap();
    let mut data = index_snapshot(snapshot).unwrap();
    let definitions = std::mem::take(&mut data.definitions);
    let context = GenerationContext::from_source(&mut data, GenerationSettings::default());
    (context, definitions)
}

fn build(id: i64, name: &str, phases: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": name,
        "process": { "type": 1, "phases": phases }
    })
}

#[test]
fn test_single_phase_build_collapses_to_steps() {
    let mut definition = build(1, "CI", vec![agent_phase("Agent job 1", vec![step("Hello", "echo hi")])]);
    definition["buildNumberFormat"] = json!("$(Date:yyyyMMdd)$(Rev:.r)");
    definition["queue"] = json!({ "name": "Hosted Ubuntu" });
    definition["variableGroups"] = json!([ { "id": 7 }, { "id": 404 } ]);
    definition["variables"] = json!({ "configuration": { "value": "Release" } });
    definition["triggers"] = json!([{
        "triggerType": "continuousIntegration",
        "branchFilters": ["+refs/heads/main"],
        "pathFilters": ["+/"],
        "batchChanges": true
    }]);

    let (context, definitions) = load(vec![definition], vec![]);
    let pipeline = context.assemble(&definitions[0]).unwrap();

    assert_eq!(pipeline.name.as_deref(), Some("$(Date:yyyyMMdd)$(Rev:.r)"));
    assert_eq!(pipeline.pool.as_ref().unwrap().name, "Hosted Ubuntu");
    let trigger = pipeline.trigger.as_ref().unwrap();
    assert_eq!(trigger.branches.as_ref().unwrap().include, vec!["main"]);
    assert!(trigger.paths.is_none());
    assert!(trigger.batch);
    assert_eq!(
        pipeline.variables,
        Some(vec![
            Variable::Group {
                group: "shared-secrets".to_string()
            },
            Variable::Named {
                name: "configuration".to_string(),
                value: Some("Release".to_string())
            },
        ])
    );
    let PipelineBody::Steps(steps) = &pipeline.body else {
        panic!("single job should collapse to steps");
    };
    assert_eq!(steps.len(), 1);

    let yaml = serde_yaml::to_string(&pipeline).unwrap();
    assert!(yaml.contains("task: Bash@3"));
    assert!(!yaml.contains("jobs:"));
}

#[test]
fn test_jobs_chain_around_empty_phases() {
    let mut disabled = step("Skipped", "exit 1");
    disabled["enabled"] = json!(false);
    let mut server_phase = agent_phase("Server", vec![step("Never", "true")]);
    server_phase["target"] = json!({ "type": 2 });
    let mut test_phase = agent_phase("Test Linux", vec![step("Test", "make test")]);
    test_phase["condition"] = json!("succeededOrFailed()");
    test_phase["jobTimeoutInMinutes"] = json!(30);

    let definition = build(
        2,
        "Multi",
        vec![
            agent_phase("Build", vec![step("Compile", "make")]),
            agent_phase("Empty", vec![disabled]),
            server_phase,
            test_phase,
        ],
    );
    let (context, definitions) = load(vec![definition], vec![]);
    let pipeline = context.assemble(&definitions[0]).unwrap();

    let PipelineBody::Jobs(jobs) = &pipeline.body else {
        panic!("two jobs should stay jobs");
    };
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].job, "Build");
    assert_eq!(jobs[0].depends_on, None);
    assert_eq!(jobs[0].condition.as_deref(), Some("succeeded()"));
    assert_eq!(jobs[1].job, "Test_Linux");
    assert_eq!(jobs[1].display_name.as_deref(), Some("Test Linux"));
    assert_eq!(jobs[1].depends_on.as_deref(), Some("Build"));
    assert_eq!(jobs[1].condition.as_deref(), Some("succeededOrFailed()"));
    assert_eq!(jobs[1].timeout_in_minutes, 30);
}

#[test]
fn test_build_without_steps_is_empty_result() {
    let definition = build(3, "Hollow", vec![agent_phase("Agent job 1", vec![])]);
    let (context, definitions) = load(vec![definition], vec![]);
    let error = context.assemble(&definitions[0]).unwrap_err();

    assert_eq!(error.category, ErrorCategory::EmptyResultError);
    assert_eq!(error.severity(), ErrorSeverity::Warning);
    assert_eq!(error.code, CODE_EMPTY_RESULT);
    assert_eq!(error.context.get("definition_id").map(String::as_str), Some("3"));
    assert_eq!(
        error.context.get("definition_name").map(String::as_str),
        Some("Hollow")
    );
}

#[test]
fn test_unknown_task_fails_the_definition() {
    let broken = json!({
        "displayName": "Mystery",
        "task": { "id": "00000000-0000-0000-0000-00000000beef", "versionSpec": "1.*" }
    });
    let definition = build(4, "Broken", vec![agent_phase("Agent job 1", vec![broken])]);
    let (context, definitions) = load(vec![definition], vec![]);
    let error = context.assemble(&definitions[0]).unwrap_err();

    assert_eq!(error.code, CODE_UNKNOWN_TASK);
    assert_eq!(
        error.context.get("definition_kind").map(String::as_str),
        Some("build definition")
    );
}

#[test]
fn test_release_environments_become_stages() {
    let release = json!({
        "id": 10,
        "name": "Web Release",
        "variables": { "region": { "value": "westeurope" } },
        "environments": [
            {
                "name": "QA env",
                "rank": 1,
                "variableGroups": [7],
                "deployPhases": [
                    deploy_phase("Second", 2, "agentBasedDeployment", vec![workflow_task("Smoke", "smoke")]),
                    deploy_phase("Gate", 0, "deploymentGates", vec![]),
                    deploy_phase("First", 1, "agentBasedDeployment", vec![workflow_task("Deploy", "deploy")])
                ]
            },
            {
                "name": "Manual",
                "rank": 2,
                "deployPhases": [ deploy_phase("Server", 1, "runOnServer", vec![]) ]
            },
            {
                "name": "Prod",
                "rank": 3,
                "deployPhases": [
                    deploy_phase("Agent job", 1, "agentBasedDeployment", vec![workflow_task("Deploy", "deploy")])
                ]
            }
        ]
    });
    let (context, definitions) = load(vec![], vec![release]);
    let pipeline = context.assemble(&definitions[0]).unwrap();

    assert_eq!(
        pipeline.variables,
        Some(vec![Variable::Named {
            name: "region".to_string(),
            value: Some("westeurope".to_string())
        }])
    );
    let PipelineBody::Stages(stages) = &pipeline.body else {
        panic!("two environments with work should stay stages");
    };
    assert_eq!(stages.len(), 2);
    assert_eq!(stages[0].stage, "QA_env");
    assert_eq!(stages[0].display_name.as_deref(), Some("Web Release"));
    assert_eq!(
        stages[0].variables,
        Some(vec![Variable::Group {
            group: "shared-secrets".to_string()
        }])
    );
    let names: Vec<&str> = stages[0].jobs.iter().map(|job| job.job.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
    assert_eq!(stages[0].jobs[1].depends_on.as_deref(), Some("First"));
    assert_eq!(stages[1].stage, "Prod");
}

#[test]
fn test_single_stage_release_collapses_and_keeps_variables() {
    let release = json!({
        "id": 11,
        "name": "Api Release",
        "variables": { "region": { "value": "westeurope" } },
        "environments": [{
            "name": "Prod",
            "variables": { "slot": { "value": "blue" } },
            "deployPhases": [
                deploy_phase("Agent job", 1, "agentBasedDeployment", vec![workflow_task("Deploy", "deploy")])
            ]
        }]
    });
    let (context, definitions) = load(vec![], vec![release]);
    let pipeline = context.assemble(&definitions[0]).unwrap();

    let PipelineBody::Steps(steps) = &pipeline.body else {
        panic!("one stage with one job should collapse to steps");
    };
    assert!(matches!(&steps[0], Step::Task(task) if task.display_name == "Deploy"));
    let names: Vec<String> = pipeline
        .variables
        .unwrap()
        .into_iter()
        .map(|variable| match variable {
            Variable::Named { name, .. } => name,
            Variable::Group { group } => group,
        })
        .collect();
    assert_eq!(names, vec!["region", "slot"]);
}

#[test]
fn test_release_without_agent_work_is_empty_result() {
    let release = json!({
        "id": 12,
        "name": "Approvals only",
        "environments": [{
            "name": "Gate",
            "deployPhases": [ deploy_phase("Wait", 1, "runOnServer", vec![]) ]
        }]
    });
    let (context, definitions) = load(vec![], vec![release]);
    let error = context.assemble(&definitions[0]).unwrap_err();
    assert_eq!(error.code, CODE_EMPTY_RESULT);
    assert_eq!(
        error.context.get("definition_kind").map(String::as_str),
        Some("release definition")
    );
}
