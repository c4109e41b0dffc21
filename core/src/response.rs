//! Response reading and redirect detection.
//!
//! # Design
//! `receive` drains the stream until the peer closes it, handing every read
//! to the observer immediately. In parallel a `RedirectDetector` keeps a
//! bounded copy of the response head and, once the stream ends, decides
//! whether the response was a redirect. Only the status line and the
//! `Location` header are ever interpreted.

use std::borrow::Cow;
use std::io::{self, Read};

use log::{debug, warn};

use crate::config::{ClientConfig, HeaderScan};
use crate::error::ClientError;
use crate::http::{HttpResponse, ResponseSignal};
use crate::observer::FetchObserver;
use crate::url::{resolve_location, Url};

const REDIRECT_STATUS_PREFIX: &[u8] = b"HTTP/1.1 3";
const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Collects the head of a response and looks for a redirect in it.
#[derive(Debug)]
pub struct RedirectDetector {
    scan: HeaderScan,
    max_head: usize,
    head: Vec<u8>,
    complete: bool,
}

impl RedirectDetector {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            scan: config.header_scan,
            max_head: config.max_header_bytes,
            head: Vec::new(),
            complete: false,
        }
    }

    /// Offer the next read to the detector. Ignored once the head is complete.
    pub fn feed(&mut self, chunk: &[u8]) {
        if self.is_complete() {
            return;
        }
        let room = self.max_head.saturating_sub(self.head.len());
        self.head.extend_from_slice(&chunk[..chunk.len().min(room)]);
        self.complete = match self.scan {
            HeaderScan::FirstChunk => true,
            HeaderScan::HeaderBlock => {
                head_end(&self.head).is_some() || self.head.len() >= self.max_head
            }
        };
    }

    /// Whether further reads can still change the outcome.
    fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether the head was cut off before its terminating blank line.
    fn is_truncated(&self) -> bool {
        head_end(&self.head).is_none()
    }

    /// The head, or when it never completed, only its fully received lines.
    /// A line cut off by the read or by `max_header_bytes` is never scanned.
    fn head_text(&self) -> Cow<'_, str> {
        let end = head_end(&self.head)
            .or_else(|| self.head.iter().rposition(|&b| b == b'\n').map(|i| i + 1))
            .unwrap_or(0);
        String::from_utf8_lossy(&self.head[..end])
    }

    /// Status code from the status line, e.g. `301` for `HTTP/1.1 301 Moved`.
    pub fn status(&self) -> Option<u16> {
        let head = String::from_utf8_lossy(&self.head);
        let code = head.lines().next()?.split_whitespace().nth(1)?;
        if code.len() != 3 {
            return None;
        }
        code.parse().ok()
    }

    /// Decide the outcome from what has been seen so far.
    ///
    /// A response is a redirect when its status line starts with
    /// `HTTP/1.1 3` and its head carries a non-empty `Location`; relative
    /// targets are resolved against `url`.
    pub fn signal(&self, url: &Url) -> ResponseSignal {
        if !self.head.starts_with(REDIRECT_STATUS_PREFIX) {
            return ResponseSignal::Done;
        }
        match find_location(&self.head_text()) {
            Some(location) => ResponseSignal::Redirect {
                location: resolve_location(&url.host, url.port, location),
            },
            None if self.is_truncated() => {
                warn!(
                    "redirect status from {url} but no complete Location header in the first {} bytes, treating as final",
                    self.head.len()
                );
                ResponseSignal::Done
            }
            None => {
                warn!("redirect status from {url} but no Location header, treating as final");
                ResponseSignal::Done
            }
        }
    }
}

/// Offset just past the blank line that ends the head, if seen.
fn head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEAD_TERMINATOR.len())
        .position(|w| w == HEAD_TERMINATOR)
        .map(|i| i + HEAD_TERMINATOR.len())
}

/// First whitespace-delimited token of the `Location` header value.
///
/// Header names are matched case-insensitively.
fn find_location(head: &str) -> Option<&str> {
    head.lines()
        .skip(1)
        .take_while(|line| !line.trim().is_empty())
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("location"))
        .and_then(|(_, value)| value.split_whitespace().next())
}

/// Read one response until end-of-stream.
///
/// Every read is passed to `observer` as it arrives. Interrupted reads are
/// retried; any other read fault is a `Read` error.
pub fn receive<R: Read>(
    reader: &mut R,
    url: &Url,
    config: &ClientConfig,
    observer: &mut dyn FetchObserver,
) -> Result<HttpResponse, ClientError> {
    let mut detector = RedirectDetector::new(config);
    let mut buf = vec![0u8; config.read_buffer_size.max(1)];
    let mut bytes_read = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ClientError::Read(e)),
        };
        let chunk = &buf[..n];
        bytes_read += n as u64;
        debug!("read {n} bytes from {url}");
        observer.on_chunk(chunk).map_err(ClientError::Output)?;
        detector.feed(chunk);
    }

    Ok(HttpResponse {
        status: detector.status(),
        bytes_read,
        signal: detector.signal(url),
    })
}
