use clap::Parser;
use yamlforge::{cli, logging};

#[tokio::main]
async fn main() -> yamlforge::Result<()> {
    let args = cli::Args::parse();
    let _logging_guard = logging::init(&args.command)?;
    cli::run(args).await
}
