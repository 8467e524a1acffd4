use super::{sink_layer, SinkLayer};
use crate::logging::config::LoggingConfig;
use crate::Result;
use anyhow::{anyhow, bail, Context};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::registry::LookupSpan;

const LOG_FILE_NAME: &str = "yamlforge.log";
const DEFAULT_LOG_DIR: &str = ".yamlforge/logs";

/// Where the file sink writes.
///
/// An absolute `logging.log_dir` is used as is. A relative one, like the
/// default, is joined onto the workspace, or onto `$HOME` when there is no
/// workspace, and may not climb out of it.
pub fn log_file_path(config: &LoggingConfig, workspace_root: Option<&Path>) -> Result<PathBuf> {
    let dir = match &config.log_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => {
            if dir.components().any(|c| matches!(c, Component::ParentDir)) {
                bail!("logging.log_dir {} must stay inside its anchor", dir.display());
            }
            anchor(workspace_root)?.join(dir)
        }
        None => anchor(workspace_root)?.join(DEFAULT_LOG_DIR),
    };
    Ok(dir.join(LOG_FILE_NAME))
}

fn anchor(workspace_root: Option<&Path>) -> Result<PathBuf> {
    match workspace_root {
        Some(workspace) => Ok(workspace.to_path_buf()),
        None => dirs_next::home_dir().ok_or_else(|| anyhow!("$HOME directory unavailable")),
    }
}

/// Non-blocking file sink. When disabled the layer discards output and no
/// worker guard is returned.
pub fn file_layer<S>(log_file: &Path, enabled: bool) -> Result<(SinkLayer<S>, Option<WorkerGuard>)>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if !enabled {
        return Ok((sink_layer(BoxMakeWriter::new(io::sink)), None));
    }

    if let Some(dir) = log_file.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    Ok((sink_layer(BoxMakeWriter::new(writer)), Some(guard)))
}
