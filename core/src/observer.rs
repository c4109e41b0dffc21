//! Hooks through which a fetch surfaces its traffic to the caller.

use std::io;

use crate::http::HttpRequest;

/// Receives each request, each response chunk and each redirect as they
/// happen. All methods default to doing nothing.
///
/// Chunks are delivered in receipt order and are never buffered and
/// replayed; `chunk.len()` is the byte count of that read. An `Err` aborts
/// the fetch with `ClientError::Output`.
pub trait FetchObserver {
    fn on_request(&mut self, _request: &HttpRequest, _bytes: &[u8]) -> io::Result<()> {
        Ok(())
    }

    fn on_chunk(&mut self, _chunk: &[u8]) -> io::Result<()> {
        Ok(())
    }

    /// Called with the resolved target before it is parsed and followed.
    fn on_redirect(&mut self, _location: &str) -> io::Result<()> {
        Ok(())
    }
}

/// An observer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl FetchObserver for NoopObserver {}
