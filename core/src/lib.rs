//! Redirect-following HTTP/1.1 `GET` client over a raw TCP stream.
//!
//! # Overview
//! Parses an absolute `http://` URL, writes a literal `GET` request with a
//! `Host` and `Connection: close` header, streams the raw response back to
//! the caller, and follows 3xx responses carrying a `Location` header until a
//! final response arrives. No HTTP library is involved.
//!
//! # Design
//! - `Client` holds only a `ClientConfig`; `Client::fetch` is the redirect loop.
//! - Parsing, request building and redirect detection are pure and work on
//!   plain data, so they are tested without a network.
//! - Response bytes reach the caller through `FetchObserver` as they are read.
//! - Every failure is a `ClientError` value returned to the caller.
//! - Synchronous and single-threaded: at most one socket is open at a time.

pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod http;
pub mod observer;
pub mod response;
pub mod types;
pub mod url;

pub use client::Client;
pub use config::{ClientConfig, HeaderScan};
pub use error::ClientError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseSignal};
pub use observer::{FetchObserver, NoopObserver};
pub use types::{FetchReport, Hop};
pub use url::{resolve_location, Url};
