use anyhow::{Context, Result};
use clap::Parser;
use declmap::cli::{setup, Cli, Commands};
use declmap::commands::{handle_emit, handle_extract, init_config, ExtractConfig};
use declmap::config::load_config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup::init_logging(cli.verbosity);

    let (path, output) = match &cli.command {
        Commands::Init { force } => return init_config(*force),
        Commands::Extract { path, output, .. } | Commands::Emit { path, output, .. } => {
            (path.clone(), output.clone())
        }
    };

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let parallel = setup::parallel_config(&config, cli.jobs, cli.no_parallel);
    if parallel.enabled {
        setup::configure_thread_pool(parallel.jobs.unwrap_or(0));
    }

    let settings = ExtractConfig {
        path,
        output,
        config,
        parallel,
    };

    match cli.command {
        Commands::Extract { format, .. } => handle_extract(settings, format),
        Commands::Emit { namespace, .. } => handle_emit(settings, namespace),
        Commands::Init { .. } => Ok(()),
    }
}
