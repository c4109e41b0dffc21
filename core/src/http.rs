//! HTTP/1.1 wire types.
//!
//! # Design
//! `HttpRequest` is plain data built from a `Url` and the query parameters;
//! `to_bytes` renders the literal message written to the socket. Nothing here
//! touches the network. `HttpResponse` is what one read cycle learned about
//! the response: everything else about it is passed through to the observer
//! uninterpreted.

use std::fmt;

use crate::url::Url;

/// HTTP method for a request. Only `GET` is ever sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `GET` request described as plain data.
///
/// Rebuilt for every connection attempt rather than modified, so a redirect
/// to another host always carries the right `Host` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    /// Empty, or `?` followed by the `&`-joined parameters.
    pub query: String,
    pub host: String,
}

impl HttpRequest {
    pub fn get(url: &Url, params: &[String]) -> Self {
        Self {
            method: HttpMethod::Get,
            path: url.path.clone(),
            query: build_query(params),
            host: url.host.clone(),
        }
    }

    /// Path plus query string, as sent on the request line.
    pub fn target(&self) -> String {
        format!("{}{}", self.path, self.query)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!(
            "{} {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
            self.method,
            self.target(),
            self.host
        )
        .into_bytes()
    }
}

/// Join `key=value` parameters into a query string, preserving their order.
///
/// Returns an empty string when there are no parameters.
pub fn build_query(params: &[String]) -> String {
    if params.is_empty() {
        return String::new();
    }
    format!("?{}", params.join("&"))
}

/// Outcome of reading one response: either a redirect to follow or the end
/// of the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseSignal {
    /// A 3xx response with a `Location`, already resolved to an absolute URL.
    Redirect { location: String },
    Done,
}

/// What a read cycle learned about one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code from the status line, if one could be parsed.
    pub status: Option<u16>,
    /// Total bytes read until the peer closed the connection.
    pub bytes_read: u64,
    pub signal: ResponseSignal,
}
