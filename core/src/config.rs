//! Client configuration.
//!
//! Built once by the caller and handed to `Client::new` by value.

use std::time::Duration;

/// Default bound on redirects followed by one fetch.
pub const DEFAULT_MAX_REDIRECTS: usize = 20;
/// Longest host accepted before connecting (a DNS name is at most 255 bytes).
pub const DEFAULT_MAX_HOST_LEN: usize = 255;
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 8 * 1024;
pub const DEFAULT_MAX_HEADER_BYTES: usize = 64 * 1024;
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

/// How much of a response is inspected for the status line and `Location`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderScan {
    /// Accumulate reads until the blank line ending the header block (or
    /// `max_header_bytes`), so headers split across reads are still found.
    #[default]
    HeaderBlock,
    /// Inspect only the first read.
    FirstChunk,
}

/// Limits and timeouts for `Client`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub max_redirects: usize,
    pub max_host_len: usize,
    pub max_request_bytes: usize,
    pub max_header_bytes: usize,
    pub read_buffer_size: usize,
    pub header_scan: HeaderScan,
    /// `None` blocks until the OS gives up.
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_host_len: DEFAULT_MAX_HOST_LEN,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            header_scan: HeaderScan::default(),
            connect_timeout: None,
            read_timeout: None,
            write_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Apply the same timeout to connect, read and write.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self.read_timeout = Some(timeout);
        self.write_timeout = Some(timeout);
        self
    }
}
