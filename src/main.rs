use clap::Parser;
use miette::Result;

use dlgview::cli::{completions, init, list, locate, preview, validate, Cli, Commands};
use dlgview::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();

    let printer = Printer::new();

    match cli.command {
        Commands::Preview(args) => preview::run(args, &printer)?,
        Commands::List(args) => list::run(args, &printer)?,
        Commands::Validate(args) => validate::run(args, &printer)?,
        Commands::Locate(args) => locate::run(args)?,
        Commands::Init(args) => init::run(args, &printer)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
