//! Console transcript of a fetch.

use std::io::{self, Write};

use hops_core::{FetchObserver, HttpRequest};

/// Writes each request, every response chunk (raw, as received) and each
/// redirect to `out`.
pub struct ConsoleObserver<W: Write> {
    out: W,
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FetchObserver for ConsoleObserver<W> {
    fn on_request(&mut self, _request: &HttpRequest, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(b"HTTP request =\n")?;
        self.out.write_all(bytes)?;
        writeln!(self.out, "\nLEN = {}", bytes.len())
    }

    fn on_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.out.write_all(chunk)?;
        writeln!(self.out, "\n Total received response bytes: {}", chunk.len())?;
        self.out.flush()
    }

    fn on_redirect(&mut self, location: &str) -> io::Result<()> {
        writeln!(self.out, "\nRedirecting to: {location}")
    }
}
