//! `hops` command-line entry point.
//!
//! Thin wrapper around `hops-core` that handles:
//! - argument parsing and usage errors
//! - logger initialization
//! - printing the response transcript to stdout
//! - mapping `ClientError` kinds to exit statuses
//!
//! All fetching happens in the library crate.

mod args;
mod logging;
mod output;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use hops_core::{Client, ClientError, FetchReport};

use crate::args::Cli;
use crate::output::ConsoleObserver;

/// Exit status for a failed fetch. Usage errors exit with clap's status 2.
fn exit_code(err: &ClientError) -> u8 {
    match err {
        ClientError::MalformedUrl(_)
        | ClientError::InvalidPort(_)
        | ClientError::HostTooLong { .. }
        | ClientError::RequestTooLarge { .. } => 3,
        ClientError::NameResolution { .. } | ClientError::Connect { .. } => 4,
        ClientError::Write(_) | ClientError::Read(_) | ClientError::Output(_) => 5,
        ClientError::TooManyRedirects { .. } => 6,
    }
}

fn write_summary(out: &mut impl Write, report: &FetchReport) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
    writeln!(out, "{json}")
}

fn main() -> ExitCode {
    let invocation = match Cli::parse().invocation() {
        Ok(invocation) => invocation,
        Err(err) => err.exit(),
    };

    if let Err(err) = logging::init_logger(invocation.log_level.map(Into::into)) {
        eprintln!("hops: logger initialization error: {err}");
        return ExitCode::FAILURE;
    }

    let client = Client::new(invocation.config);
    let mut observer = ConsoleObserver::new(io::stdout().lock());

    match client.fetch(&invocation.url, &invocation.params, &mut observer) {
        Ok(report) => {
            log::debug!(
                "finished at {} after {} redirect(s)",
                report.final_url,
                report.redirects
            );
            if invocation.summary {
                let mut out = observer.into_inner();
                if let Err(err) = write_summary(&mut out, &report) {
                    eprintln!("hops: could not write summary: {err}");
                    return ExitCode::from(exit_code(&ClientError::Output(err)));
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("hops: {err}");
            ExitCode::from(exit_code(&err))
        }
    }
}
