//! Command-line arguments.
//!
//! The accepted grammar is `hops [OPTIONS] [-r N PARAM...] <URL>`, options in
//! any order. Because `-r` takes a variable number of values, a URL written
//! after the parameters is swallowed by `-r`; `Cli::invocation` pulls it back
//! out and validates the count and each `key=value` parameter.

use std::time::Duration;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use hops_core::config::DEFAULT_MAX_REDIRECTS;
use hops_core::{ClientConfig, HeaderScan};

const URL_PREFIX: &str = "http://";

/// Logging level, overriding `RUST_LOG` when given.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Fetch an http:// URL with GET, following redirects, and print the raw
/// responses.
#[derive(Debug, Parser)]
#[command(
    name = "hops",
    version,
    override_usage = "hops [OPTIONS] [-r <N> <PARAM>...] <URL>"
)]
pub struct Cli {
    /// URL to fetch, starting with http://
    pub url: Option<String>,

    /// Query parameters: a count N followed by N key=value pairs
    #[arg(short = 'r', num_args = 1.., value_name = "N PARAM")]
    pub request_params: Vec<String>,

    /// Give up after following this many redirects
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    /// Connect, read and write timeout in seconds (none by default)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Look for the redirect only in the first read of each response
    #[arg(long)]
    pub first_chunk_only: bool,

    /// Print the redirect chain as JSON once the transfer completes
    #[arg(long)]
    pub summary: bool,

    /// Log level (overrides RUST_LOG)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

/// Everything `main` needs, validated.
#[derive(Debug)]
pub struct Invocation {
    pub url: String,
    pub params: Vec<String>,
    pub config: ClientConfig,
    pub summary: bool,
    pub log_level: Option<LogLevel>,
}

impl Cli {
    pub fn invocation(self) -> Result<Invocation, clap::Error> {
        let config = self.client_config();
        let (url, params) = split_request_params(self.request_params, self.url)?;
        Ok(Invocation {
            url,
            params,
            config,
            summary: self.summary,
            log_level: self.log_level,
        })
    }

    fn client_config(&self) -> ClientConfig {
        let config = ClientConfig {
            max_redirects: self.max_redirects,
            header_scan: if self.first_chunk_only {
                HeaderScan::FirstChunk
            } else {
                HeaderScan::HeaderBlock
            },
            ..ClientConfig::default()
        };
        match self.timeout {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

fn usage_error(kind: ErrorKind, message: String) -> clap::Error {
    Cli::command().error(kind, message)
}

/// Separate the `-r` values into parameter groups and, when the URL was
/// written after them, the URL.
///
/// Each group is a count followed by that many `key=value` parameters;
/// repeated `-r` flags append their groups in order.
fn split_request_params(
    tokens: Vec<String>,
    url: Option<String>,
) -> Result<(String, Vec<String>), clap::Error> {
    let mut url = url;
    let mut params = Vec::new();
    let mut tokens = tokens.into_iter();

    while let Some(token) = tokens.next() {
        if url.is_none() && token.starts_with(URL_PREFIX) {
            url = Some(token);
            continue;
        }
        let count: usize = token.parse().map_err(|_| {
            usage_error(
                ErrorKind::InvalidValue,
                format!("-r expects a parameter count, found '{token}'"),
            )
        })?;
        for n in 0..count {
            let param = tokens.next().ok_or_else(|| {
                usage_error(
                    ErrorKind::WrongNumberOfValues,
                    format!("-r {count} expects {count} parameters, found {n}"),
                )
            })?;
            if !param.contains('=') {
                return Err(usage_error(
                    ErrorKind::InvalidValue,
                    format!("parameter '{param}' is not of the form key=value"),
                ));
            }
            params.push(param);
        }
    }

    let url = url.ok_or_else(|| {
        usage_error(ErrorKind::MissingRequiredArgument, "a URL is required".to_string())
    })?;
    if !url.starts_with(URL_PREFIX) {
        return Err(usage_error(
            ErrorKind::InvalidValue,
            format!("URL must start with '{URL_PREFIX}', found '{url}'"),
        ));
    }
    Ok((url, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Invocation, clap::Error> {
        let mut argv = vec!["hops"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv)?.invocation()
    }

    #[test]
    fn url_only() {
        let inv = parse(&["http://example.com/index"]).unwrap();
        assert_eq!(inv.url, "http://example.com/index");
        assert!(inv.params.is_empty());
        assert_eq!(inv.config.max_redirects, DEFAULT_MAX_REDIRECTS);
        assert_eq!(inv.config.header_scan, HeaderScan::HeaderBlock);
        assert!(inv.config.read_timeout.is_none());
        assert!(!inv.summary);
    }

    #[test]
    fn params_before_url() {
        let inv = parse(&["-r", "2", "q=test", "lang=en", "http://example.com:8080/search"]).unwrap();
        assert_eq!(inv.url, "http://example.com:8080/search");
        assert_eq!(inv.params, vec!["q=test", "lang=en"]);
    }

    #[test]
    fn params_after_url() {
        let inv = parse(&["http://example.com/", "-r", "1", "a=1"]).unwrap();
        assert_eq!(inv.url, "http://example.com/");
        assert_eq!(inv.params, vec!["a=1"]);
    }

    #[test]
    fn zero_params() {
        let inv = parse(&["-r", "0", "http://example.com/"]).unwrap();
        assert!(inv.params.is_empty());
    }

    #[test]
    fn repeated_groups_append() {
        let inv = parse(&["-r", "1", "a=1", "-r", "1", "b=2", "http://h/"]).unwrap();
        assert_eq!(inv.params, vec!["a=1", "b=2"]);
    }

    #[test]
    fn param_without_equals_is_rejected() {
        let err = parse(&["-r", "1", "novalue", "http://h/"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn non_numeric_count_is_rejected() {
        let err = parse(&["-r", "two", "a=1", "b=2", "http://h/"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn too_few_params_is_rejected() {
        let err = parse(&["http://h/", "-r", "3", "a=1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongNumberOfValues);
    }

    #[test]
    fn missing_url_is_rejected() {
        let err = parse(&["-r", "1", "a=1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn non_http_url_is_rejected() {
        let err = parse(&["ftp://host/path"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn options_map_onto_client_config() {
        let inv = parse(&[
            "--max-redirects",
            "3",
            "--timeout",
            "5",
            "--first-chunk-only",
            "--summary",
            "--log-level",
            "debug",
            "http://h/",
        ])
        .unwrap();
        assert_eq!(inv.config.max_redirects, 3);
        assert_eq!(inv.config.header_scan, HeaderScan::FirstChunk);
        assert_eq!(inv.config.connect_timeout, Some(Duration::from_secs(5)));
        assert_eq!(inv.config.read_timeout, Some(Duration::from_secs(5)));
        assert_eq!(inv.config.write_timeout, Some(Duration::from_secs(5)));
        assert!(inv.summary);
        assert_eq!(inv.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(parse(&["--timeout", "0", "http://h/"]).is_err());
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
