use clap::{Parser, Subcommand};
use cli::{Generate, Run};

mod cli;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct AtcTools {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sample arrival batches and print them as JSON
    Generate(Generate),
    /// Run episodes with a baseline policy
    Run(Run)
}

fn main() -> anyhow::Result<()> {
    let cli = AtcTools::parse();
    match cli.command {
        Command::Generate(generate) => generate.generate(),
        Command::Run(run) => run.run()
    }
}
