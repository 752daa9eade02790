use clap::Parser;
use miette::Result;
use starqr::cli::{Cli, Commands};
use starqr::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Render(args) => starqr::cli::render::run(args, config, &printer)?,
        Commands::Generate(args) => starqr::cli::generate::run(args, config, &printer)?,
        Commands::Serve(args) => starqr::cli::serve::run(args, config, &printer)?,
        Commands::Completions(args) => starqr::cli::completions::run(args)?,
    }

    Ok(())
}
