mod repl;
mod runner;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Print the parsed program instead of running it
    #[arg(long)]
    ast: bool,
    /// Program to run; starts a REPL when omitted
    path: Option<PathBuf>,
}

/// Logs go to stderr so they never mix with program output. Nothing is
/// installed unless `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.path {
        None => repl::start(cli.ast).map_err(|err| err.to_string()),
        Some(path) if cli.ast => runner::print_ast(&path).map_err(|err| err.to_string()),
        Some(path) => runner::execute_file(&path).map_err(|err| err.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
