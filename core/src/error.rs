//! Error types for the redirect-following client.
//!
//! # Design
//! Every failure is returned as a value and propagated with `?` up to the
//! caller of `Client::fetch`; nothing below the binary's `main` terminates the
//! process. The I/O variants keep the underlying `std::io::Error` as their
//! source so the CLI can print the OS-level cause.

use std::fmt;
use std::io;

/// Errors returned by URL parsing and by `Client::fetch`.
#[derive(Debug)]
pub enum ClientError {
    /// The URL does not start with `http://`.
    MalformedUrl(String),

    /// The port segment is empty, not all digits, or outside 1..=65535.
    InvalidPort(String),

    /// The host is longer than `ClientConfig::max_host_len`.
    HostTooLong { host: String, limit: usize },

    /// The serialized request exceeds `ClientConfig::max_request_bytes`.
    RequestTooLarge { size: usize, limit: usize },

    /// The host did not resolve to any socket address.
    NameResolution { host: String, source: io::Error },

    /// No resolved address accepted the TCP handshake.
    Connect {
        host: String,
        port: u16,
        source: io::Error,
    },

    /// Writing the request to the socket failed.
    Write(io::Error),

    /// Reading the response from the socket failed.
    Read(io::Error),

    /// The observer failed to consume request or response output.
    Output(io::Error),

    /// More than `ClientConfig::max_redirects` redirects were followed.
    TooManyRedirects { limit: usize, location: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::MalformedUrl(url) => {
                write!(f, "malformed URL {url:?}: must start with 'http://'")
            }
            ClientError::InvalidPort(port) => write!(f, "invalid port number {port:?}"),
            ClientError::HostTooLong { host, limit } => {
                write!(f, "host is {} bytes long, limit is {limit}", host.len())
            }
            ClientError::RequestTooLarge { size, limit } => {
                write!(f, "request is {size} bytes, limit is {limit}")
            }
            ClientError::NameResolution { host, source } => {
                write!(f, "could not resolve host {host}: {source}")
            }
            ClientError::Connect { host, port, source } => {
                write!(f, "could not connect to {host}:{port}: {source}")
            }
            ClientError::Write(e) => write!(f, "write failed: {e}"),
            ClientError::Read(e) => write!(f, "read failed: {e}"),
            ClientError::Output(e) => write!(f, "output failed: {e}"),
            ClientError::TooManyRedirects { limit, location } => {
                write!(f, "too many redirects (limit {limit}), next location was {location}")
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::NameResolution { source, .. } | ClientError::Connect { source, .. } => {
                Some(source)
            }
            ClientError::Write(e) | ClientError::Read(e) | ClientError::Output(e) => Some(e),
            _ => None,
        }
    }
}
