use clap::Parser;
use miette::Result;
use pxfx::cli::{Cli, Commands};
use pxfx::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Apply(args) => pxfx::cli::apply::run(args, &printer)?,
        Commands::Compare(args) => pxfx::cli::compare::run(args, &printer)?,
        Commands::Completions(args) => pxfx::cli::completions::run(args)?,
    }

    Ok(())
}
