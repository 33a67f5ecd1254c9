use std::process::ExitCode;

use nexus::cli::{self, Cli};
use nexus::ui::output;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Cli::parse_args();
    let debug = args.debug;

    // Level is overridden by `RUST_LOG`.
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if debug {
                output::error(format!("{:?}", err));
            } else {
                output::error(format!("{:#}", err));
            }
            ExitCode::FAILURE
        }
    }
}
