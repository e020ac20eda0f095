mod app;
mod cli;
mod config;
mod errors;
mod grouping;
mod input;
mod models;
mod output;
mod radar;
mod scoring;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, OutputFormat, Verbosity};
use output::OutputFormatter;

fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let cli = Cli::parse();

    // Convert verbosity flag
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::from(cli.verbose.saturating_add(1))
    };

    let mut config_provider = config::TomlConfigProvider::new();
    if let Some(path) = &cli.config {
        config_provider = config_provider.with_config_file(path.clone());
    }

    match cli.format {
        OutputFormat::Pretty => {
            let formatter = output::PrettyFormatter::with_emoji(!cli.no_emoji);
            run(cli.command, config_provider, formatter, verbosity)
        }
        OutputFormat::Json => run(
            cli.command,
            config_provider,
            output::JsonFormatter::new(),
            verbosity,
        ),
    }
}

fn run<O: OutputFormatter>(
    command: Commands,
    config_provider: config::TomlConfigProvider,
    formatter: O,
    verbosity: Verbosity,
) -> anyhow::Result<()> {
    let app = app::HexlensApp::new(config_provider, formatter).with_verbosity(verbosity);

    // Determine which command to run
    let output = match command {
        Commands::Hexagon(args) => app.hexagon(args).context("hexagon panel failed")?,
        Commands::Grid(args) => app.grid(args).context("repository grid failed")?,
        Commands::Debug(args) => app.debug(args).context("lens data viewer failed")?,
        Commands::Tier(args) => app.tier(args).context("tier calculation failed")?,
        Commands::Svg(args) => app.svg(args).context("SVG rendering failed")?,
    };

    if verbosity != Verbosity::Quiet && !output.text.is_empty() {
        println!("{}", output.text.trim_end());
    }

    output.check_gate()?;
    Ok(())
}
