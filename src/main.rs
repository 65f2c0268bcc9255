use anyhow::{Context, Error};
use clap::Parser;
use metrics_plot::cli::Cli;
use metrics_plot::{run, TerminalSurface};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("metrics_plot=info")),
        )
        .init();

    let config = Cli::parse()
        .into_config()
        .context("Failed to build configuration")?;
    tracing::info!("Plotting `{}` from {:?}", config.series, config.input);

    let mut surface = TerminalSurface::stdout(config.width, config.height);
    run(&config, &mut surface).context("Failed to plot metrics")?;

    Ok(())
}
