//! Blocking TCP connection to one `(host, port)`.
//!
//! # Design
//! A `Connection` owns its `TcpStream`, so the socket is released on every
//! path that drops it; `close` is the explicit normal-path shutdown. Every
//! address the host resolves to is tried in order, which lets `localhost`
//! work whether the peer listens on IPv4 or IPv6.

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

use log::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;

#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    host: String,
    port: u16,
}

impl Connection {
    /// Resolve `host` and connect to the first address that accepts.
    ///
    /// Read and write timeouts from `config` are applied to the stream.
    pub fn open(host: &str, port: u16, config: &ClientConfig) -> Result<Self, ClientError> {
        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|source| ClientError::NameResolution {
                host: host.to_string(),
                source,
            })?
            .collect();
        if addrs.is_empty() {
            return Err(ClientError::NameResolution {
                host: host.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no addresses found"),
            });
        }

        let connect_err = |source| ClientError::Connect {
            host: host.to_string(),
            port,
            source,
        };

        let mut last_err = None;
        for addr in &addrs {
            debug!("connecting to {host}:{port} via {addr}");
            let attempt = match config.connect_timeout {
                Some(timeout) => TcpStream::connect_timeout(addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => {
                    stream.set_read_timeout(config.read_timeout).map_err(connect_err)?;
                    stream.set_write_timeout(config.write_timeout).map_err(connect_err)?;
                    return Ok(Self {
                        stream,
                        host: host.to_string(),
                        port,
                    });
                }
                Err(e) => {
                    debug!("connect to {addr} failed: {e}");
                    last_err = Some(e);
                }
            }
        }
        Err(connect_err(
            last_err.unwrap_or_else(|| io::Error::other("no address accepted the connection")),
        ))
    }

    /// Write the whole request; a short or failed write is a `Write` error.
    pub fn send(&mut self, bytes: &[u8]) -> Result<(), ClientError> {
        self.stream.write_all(bytes).map_err(ClientError::Write)?;
        self.stream.flush().map_err(ClientError::Write)
    }

    pub fn close(self) {
        match self.stream.shutdown(Shutdown::Both) {
            Ok(()) => {}
            // The peer closing first is the normal end of a `Connection: close` exchange.
            Err(e) if e.kind() == io::ErrorKind::NotConnected => {}
            Err(e) => debug!("shutdown of {}:{} failed: {e}", self.host, self.port),
        }
        debug!("closed connection to {}:{}", self.host, self.port);
    }
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}
