use clap::Parser;
use stacks_logs::cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("stacks_logs=debug,info")
    } else {
        EnvFilter::new("stacks_logs=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::DenovoMap(args) => {
            cli::denovo_map::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Populations(args) => {
            cli::populations::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Summary(args) => {
            cli::summary::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
