use clap::Parser;
use decal_builder::cli::{Cli, Commands};
use decal_builder::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => {
            let logfile = (!cli.log_stderr).then_some(cli.logfile.as_path());
            decal_builder::logging::init(cli.debug, logfile)?;

            let report = decal_builder::cli::build::run(args, &printer)?;
            if !report.is_success() {
                std::process::exit(1);
            }
        }
        Commands::Categories(args) => decal_builder::cli::categories::run(args)?,
        Commands::Completions(args) => decal_builder::cli::completions::run(args)?,
    }

    Ok(())
}
