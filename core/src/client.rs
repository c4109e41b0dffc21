//! The redirect loop.
//!
//! # Design
//! `Client` holds only its `ClientConfig`. `fetch` walks the chain
//! build → connect → send → receive, then either re-parses the resolved
//! `Location` and starts over, or stops. Each iteration owns exactly one
//! `Connection`, which is closed (or dropped, on error paths) before the
//! next one is opened. The only state carried between iterations is the
//! current `Url`, the redirect count and the hop list.

use log::{debug, info};

use crate::config::ClientConfig;
use crate::connection::Connection;
use crate::error::ClientError;
use crate::http::{HttpRequest, ResponseSignal};
use crate::observer::FetchObserver;
use crate::response::receive;
use crate::types::{FetchReport, Hop};
use crate::url::Url;

/// Blocking HTTP/1.1 `GET` client that follows redirects.
#[derive(Debug, Clone, Default)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Build the request for `url`, enforcing the host and request size limits.
    pub fn build_request(&self, url: &Url, params: &[String]) -> Result<HttpRequest, ClientError> {
        if url.host.len() > self.config.max_host_len {
            return Err(ClientError::HostTooLong {
                host: url.host.clone(),
                limit: self.config.max_host_len,
            });
        }
        let request = HttpRequest::get(url, params);
        let size = request.to_bytes().len();
        if size > self.config.max_request_bytes {
            return Err(ClientError::RequestTooLarge {
                size,
                limit: self.config.max_request_bytes,
            });
        }
        Ok(request)
    }

    /// Fetch `url` with the given `key=value` query parameters, following
    /// redirects until a non-redirect response arrives.
    ///
    /// The URL is parsed before any network activity. The same parameters
    /// are appended to every request in the chain. Fails with
    /// `TooManyRedirects` once more than `max_redirects` redirects would be
    /// followed.
    pub fn fetch(
        &self,
        url: &str,
        params: &[String],
        observer: &mut dyn FetchObserver,
    ) -> Result<FetchReport, ClientError> {
        let mut current = Url::parse(url)?;
        let mut hops = Vec::new();
        let mut redirects = 0;

        loop {
            let request = self.build_request(&current, params)?;
            let bytes = request.to_bytes();
            observer
                .on_request(&request, &bytes)
                .map_err(ClientError::Output)?;

            let mut conn = Connection::open(&current.host, current.port, &self.config)?;
            debug!("sending {} bytes to {current}", bytes.len());
            conn.send(&bytes)?;
            let response = receive(&mut conn, &current, &self.config, observer)?;
            conn.close();

            hops.push(Hop {
                url: current.to_string(),
                status: response.status,
                bytes: response.bytes_read,
            });

            match response.signal {
                ResponseSignal::Redirect { location } => {
                    if redirects >= self.config.max_redirects {
                        return Err(ClientError::TooManyRedirects {
                            limit: self.config.max_redirects,
                            location,
                        });
                    }
                    redirects += 1;
                    info!("redirect {redirects}: {current} -> {location}");
                    observer
                        .on_redirect(&location)
                        .map_err(ClientError::Output)?;
                    current = Url::parse(&location)?;
                }
                ResponseSignal::Done => {
                    return Ok(FetchReport {
                        hops,
                        final_url: current.to_string(),
                        redirects,
                    });
                }
            }
        }
    }
}
