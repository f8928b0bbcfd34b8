mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use commands::{cmd_check, cmd_init, cmd_resolve, cmd_scan};
use miette::Result;
use tracing_subscriber::EnvFilter;

/// Install the stderr logger. `RUST_LOG` wins when set; otherwise
/// `--verbose` selects debug output and the default is warnings only.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init(args) => cmd_init(args),
        Commands::Scan(args) => cmd_scan(args),
        Commands::Check(args) => cmd_check(args),
        Commands::Resolve(args) => cmd_resolve(args),
    };

    result.map_err(|e| e.into())
}
