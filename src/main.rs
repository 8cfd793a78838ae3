// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, build the HTTP transport and hand the
//   arguments to the dispatcher.
// - Every failure is printed to stderr and exits with status 1.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use sda_admin::api::HttpTransport;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let transport = HttpTransport::new()?;

    let mut stdout = std::io::stdout().lock();
    sda_admin::run(&args, &|name: &str| std::env::var(name).ok(), &transport, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Diagnostics go to stderr so stdout carries only command output. Verbosity
/// is controlled with `RUST_LOG`, e.g. `RUST_LOG=sda_admin=debug`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
