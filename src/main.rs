use clap::Parser;
use miette::Result;

use phishguard::cli::{Cli, Commands};
use phishguard::{commands, global};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    global::ensure_global_config()?;
    let config = global::read_config()?;

    match cli.command {
        Commands::Scan(args) => commands::scan::run(args, &config),
        Commands::Session(args) => commands::session::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
