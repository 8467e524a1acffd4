use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Project snapshot to convert (.json, .yml or .yaml)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Folder that receives the project folder (default: current directory)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Only convert definitions whose name contains this text (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Splice task group steps into pipelines instead of writing templates
    #[arg(long, help_heading = "Generation")]
    pub inline: bool,

    /// Convert one definition at a time
    #[arg(long, conflicts_with = "parallel_limit", help_heading = "Generation")]
    pub sequential: bool,

    /// Maximum definitions converted at once (default: host core count)
    #[arg(long, value_name = "N", help_heading = "Generation")]
    pub parallel_limit: Option<usize>,

    /// Generate and report without writing any files
    #[arg(long, help_heading = "Generation")]
    pub dry_run: bool,

    /// Read settings from this file instead of ./yamlforge.toml
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// Silence console logging; the summary is still printed
    #[arg(long, short = 'q', help_heading = "Output Options")]
    pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project snapshot to inspect (.json, .yml or .yaml)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Only list definitions whose name contains this text (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    pub filter: Option<String>,
}
