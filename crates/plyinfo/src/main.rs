mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    //  Logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,plyinfo=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();

    match args.command {
        cli::Commands::Show(show_args) => cli::show::execute(show_args),
        cli::Commands::Check(check_args) => cli::check::execute(check_args),
        cli::Commands::Config(c) => cli::config_cmd::execute(c),
    }
}
