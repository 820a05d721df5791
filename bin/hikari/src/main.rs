use clap::{ArgAction, Parser};
use clap_handler::Handler;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[clap(version, about)]
struct HikariArgs {
    /// Increase log verbosity. `RUST_LOG` takes precedence.
    #[clap(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: commands::HikariCommand,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = HikariArgs::parse();
    init_logging(args.verbose);
    args.command.run().await
}
