//! Compost entry point.

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use compost_app::Console;
use compost_cli::{LaunchOptions, launch, shutdown};
use compost_net::SimConnector;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Minimal interactive chat client
#[derive(Parser, Debug)]
#[command(name = "compost")]
#[command(about = "Connect to a configured server, join its channels and chat from the terminal")]
#[command(version)]
struct Args {
    /// Configuration file, tried before the default locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server index to connect to (skips the interactive prompt)
    #[arg(short, long, allow_hyphen_values = true)]
    server: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    // stdout belongs to the chat transcript
    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    tracing::info!("compost starting");

    let options = LaunchOptions::from_flags(args.config, args.server);
    let mut stdout = io::stdout();

    let session = match launch(&options, io::stdin().lock(), &mut stdout, &SimConnector::new()).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e.chain(), "startup failed");
            let _ = writeln!(stdout, "{e}");
            return ExitCode::FAILURE;
        },
    };

    tracing::info!(server = %session.server().name, "session started");

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let code = match session.run(input, Console::stdout(), shutdown::signal()).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "session failed");
            1
        },
    };

    // The blocking stdin reader would otherwise keep the runtime from
    // shutting down.
    std::process::exit(code)
}
