//! `pyjs` - translate Python source files into JavaScript.

mod commands;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "pyjs", version, about = "Translate Python source into JavaScript")]
struct Cli {
    #[command(flatten)]
    translate: commands::translate::TranslateArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = commands::translate::run(cli.translate) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
