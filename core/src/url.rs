//! Absolute `http://` URLs and redirect target resolution.
//!
//! # Design
//! Only the `http` scheme is understood. The parser splits the authority on
//! the first `:` that appears before the first `/`; a URL is never mutated
//! after parsing, a redirect produces a new `Url` from the resolved target.

use std::fmt;

use serde::Serialize;

use crate::error::ClientError;

const SCHEME_PREFIX: &str = "http://";

/// Port used when the authority has no `:port` segment.
pub const DEFAULT_PORT: u16 = 80;

/// A parsed `http://host[:port][/path]` URL.
///
/// `port` is always set and `path` always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Url {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Url {
    /// Parse an absolute URL.
    ///
    /// Fails with `MalformedUrl` when `raw` lacks the `http://` prefix and with
    /// `InvalidPort` when the port segment is not a decimal number in
    /// 1..=65535. Everything after the authority, query string included, is
    /// kept verbatim as the path.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let rest = raw
            .strip_prefix(SCHEME_PREFIX)
            .ok_or_else(|| ClientError::MalformedUrl(raw.to_string()))?;

        let slash = rest.find('/');
        // A ':' after the first '/' belongs to the path, not the authority.
        let port_colon = rest
            .find(':')
            .filter(|&c| !matches!(slash, Some(s) if s < c));

        let (host, port, path) = match (port_colon, slash) {
            (Some(c), _) => {
                let after_colon = &rest[c + 1..];
                let (port, path) = match after_colon.find('/') {
                    Some(s) => (&after_colon[..s], &after_colon[s..]),
                    None => (after_colon, ""),
                };
                (&rest[..c], parse_port(port)?, path)
            }
            (None, Some(s)) => (&rest[..s], DEFAULT_PORT, &rest[s..]),
            (None, None) => (rest, DEFAULT_PORT, ""),
        };

        Ok(Self {
            host: host.to_string(),
            port,
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
        })
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http://{}:{}{}", self.host, self.port, self.path)
    }
}

fn parse_port(raw: &str) -> Result<u16, ClientError> {
    let invalid = || ClientError::InvalidPort(raw.to_string());
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match raw.parse::<u16>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(port) => Ok(port),
    }
}

/// Resolve a `Location` header value against the host and port that served it.
///
/// Origin-relative values (starting with `/`) become
/// `http://{host}:{port}{location}`; anything else is returned unchanged and
/// validated only when it is parsed as the next URL.
pub fn resolve_location(host: &str, port: u16, location: &str) -> String {
    if location.starts_with('/') {
        format!("{SCHEME_PREFIX}{host}:{port}{location}")
    } else {
        location.to_string()
    }
}
