use crate::{
    cli::args::{GenerateArgs, ListArgs},
    core::{
        filter_definitions, ConfigLoader, DefinitionOrchestrator, DefinitionSource,
        GenerationContext, GenerationReport, GenerationSettings, SnapshotSource, YamlWriter,
        YamlforgeConfig,
    },
    Result,
};
use anyhow::anyhow;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

/// Resolve settings: defaults, then config file, then environment, then flags.
pub fn resolve_generate_config(args: &GenerateArgs) -> Result<YamlforgeConfig> {
    let mut config = match &args.config {
        Some(path) => {
            if !path.is_file() {
                return Err(anyhow!("config file {} not found", path.display()));
            }
            ConfigLoader::load(path)?
        }
        None => ConfigLoader::load_from_workspace(&std::env::current_dir()?)?,
    };
    apply_generate_overrides(&mut config, args);
    ConfigLoader::validate_config(&config)?;
    Ok(config)
}

fn apply_generate_overrides(config: &mut YamlforgeConfig, args: &GenerateArgs) {
    if let Some(output) = &args.output {
        config.output.path = output.clone();
    }
    if let Some(filter) = &args.filter {
        config.output.filter = Some(filter.clone());
    }
    if args.inline {
        config.generation.inline_task_groups = true;
    }
    if args.sequential {
        config.generation.parallel = false;
    }
    if let Some(limit) = args.parallel_limit {
        config.generation.parallel = true;
        config.generation.parallel_limit = Some(limit);
    }
}

pub async fn generate(args: GenerateArgs) -> Result<()> {
    let config = resolve_generate_config(&args)?;
    let source = SnapshotSource::from_path(&args.snapshot);
    let mut data = source.load()?;

    let definitions = filter_definitions(
        std::mem::take(&mut data.definitions),
        config.output.filter.as_deref(),
    );
    if let Some(filter) = &config.output.filter {
        tracing::info!(filter = %filter, matched = definitions.len(), "definition filter applied");
    }

    let settings = GenerationSettings {
        inline_task_groups: config.generation.inline_task_groups,
    };
    let context = Arc::new(GenerationContext::from_source(&mut data, settings));
    let orchestrator = DefinitionOrchestrator::new(context)
        .with_parallel_limit(config.effective_parallel_limit());
    let mut report = orchestrator.run(definitions).await;

    let output_root = if args.dry_run {
        None
    } else {
        let writer = YamlWriter::new(&config.output.path, &data.project);
        writer.write_report(&mut report);
        Some(writer.root().to_path_buf())
    };

    print!("{}", render_summary(&report, output_root.as_deref()));
    Ok(())
}

pub async fn list(args: ListArgs) -> Result<()> {
    let data = SnapshotSource::from_path(&args.snapshot).load()?;
    let definitions = filter_definitions(data.definitions, args.filter.as_deref());

    println!("Project: {}", data.project);
    for definition in &definitions {
        println!(
            "{:<20} {:>6}  {}",
            definition.kind().to_string(),
            definition.id(),
            definition.name()
        );
    }
    println!("{} definition(s)", definitions.len());
    Ok(())
}

/// Human-readable run summary: counts followed by every recorded error.
pub fn render_summary(report: &GenerationReport, output_root: Option<&Path>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Generated {} pipeline(s) and {} template(s) from {} definition(s).",
        report.pipelines.len(),
        report.templates.len(),
        report.processed()
    );
    match output_root {
        Some(root) => {
            let _ = writeln!(
                out,
                "Wrote {} file(s) to {}",
                report.files_written,
                root.display()
            );
        }
        None => {
            let _ = writeln!(out, "Dry run: no files written.");
        }
    }
    if report.has_failures() {
        let _ = writeln!(
            out,
            "{} error(s):",
            report.failures.len() + report.write_failures.len()
        );
        for failure in report.errors() {
            let _ = writeln!(
                out,
                "  [{}] {}: {}",
                failure.error.code, failure.definition, failure.error.message
            );
        }
    }
    out
}
