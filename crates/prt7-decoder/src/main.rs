//! PRT-7 decoder binary.
//!
//! Reads frames from the configured source, prints the progress report to
//! stdout, and logs to stderr.

use std::{io, process::ExitCode};

use clap::Parser;
use prt7_decoder::{Config, launch};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = Config::parse();
    init_tracing(&config.log_level);

    match launch(&config, io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "decoder stopped");
            ExitCode::FAILURE
        },
    }
}

/// `RUST_LOG` wins over `--log-level`.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}
