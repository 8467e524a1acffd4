pub mod args;
pub mod commands;

pub use args::{GenerateArgs, ListArgs};
use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

#[derive(Parser, Debug)]
#[command(name = "yamlforge")]
#[command(version = crate::VERSION)]
#[command(about = "Convert classic build and release definitions into YAML pipelines")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: export a project snapshot, list what it contains, then generate pipelines and task group templates."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Generate pipelines and templates from a snapshot",
        long_about = "Generate converts every designer build and release definition in the snapshot into a YAML pipeline. Task groups become shared templates unless --inline is given. Failures are reported per definition and never stop the run.",
        after_help = "Example:\n    yamlforge generate ./payments.json --output ./pipelines --filter deploy"
    )]
    Generate(GenerateArgs),
    #[command(
        about = "List the definitions a snapshot contains",
        long_about = "List prints the build and release definitions that generate would convert, after applying the optional name filter.",
        after_help = "Example:\n    yamlforge list ./payments.json --filter web"
    )]
    List(ListArgs),
}

pub async fn run(args: Args) -> crate::Result<()> {
    match args.command {
        Command::Generate(generate_args) => commands::generate(generate_args).await,
        Command::List(list_args) => commands::list(list_args).await,
    }
}
