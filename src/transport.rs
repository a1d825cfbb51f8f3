//! Byte-stream transports: stdin, files / tty devices and TCP sockets.
//!
//! Each source runs on its own reader thread and forwards raw chunks through an
//! [`RxSink`]. A thread is the only writer for its source, which keeps chunks of one
//! source in order. Readers stop when their [`CancelToken`] is cancelled or the stream
//! ends.

use std::fs::File;
use std::io::{self, Read};
use std::net::TcpStream;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{info, warn};

use crate::data::SourceId;
use crate::error::{Error, Result};
use crate::sink::RxSink;

const READ_CHUNK: usize = 1024;
const TCP_READ_TIMEOUT: Duration = Duration::from_millis(200);

/// Where a source's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// Standard input (`-`).
    Stdin,
    /// A TCP endpoint (`tcp://host:port`), e.g. a serial-to-network bridge.
    Tcp(String),
    /// A regular file, FIFO or already configured tty device.
    File(PathBuf),
}

impl FromStr for SourceSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidSource(s.to_string()));
        }
        if s == "-" {
            return Ok(SourceSpec::Stdin);
        }
        if let Some(addr) = s.strip_prefix("tcp://") {
            if addr.is_empty() || !addr.contains(':') {
                return Err(Error::InvalidSource(s.to_string()));
            }
            return Ok(SourceSpec::Tcp(addr.to_string()));
        }
        Ok(SourceSpec::File(PathBuf::from(s)))
    }
}

impl SourceSpec {
    /// Identifier used for series keys and logging.
    pub fn source_id(&self) -> SourceId {
        match self {
            SourceSpec::Stdin => SourceId::from("stdin"),
            SourceSpec::Tcp(addr) => SourceId(addr.clone()),
            SourceSpec::File(path) => SourceId(path.display().to_string()),
        }
    }
}

/// Shared stop flag for reader threads, tied to session teardown.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Open `spec` and start a reader thread for it.
///
/// Opening happens on the calling thread so setup failures are reported immediately.
pub fn spawn_reader(spec: SourceSpec, sink: RxSink, cancel: CancelToken) -> Result<JoinHandle<()>> {
    let source = spec.source_id();
    let reader: Box<dyn Read + Send> = match &spec {
        SourceSpec::Stdin => Box::new(io::stdin()),
        SourceSpec::File(path) => Box::new(File::open(path)?),
        SourceSpec::Tcp(addr) => {
            let stream = TcpStream::connect(addr)?;
            stream.set_read_timeout(Some(TCP_READ_TIMEOUT))?;
            Box::new(stream)
        }
    };
    info!(source = %source, "transport connected");
    let name = match &spec {
        SourceSpec::Stdin => Some("stdin".to_string()),
        _ => None,
    };
    // The receiver only goes away when the UI is closing.
    let _ = sink.connected(&source, name);

    let handle = std::thread::Builder::new()
        .name(format!("rx-{source}"))
        .spawn(move || {
            pump(reader, &source, &sink, &cancel);
        })?;
    Ok(handle)
}

/// Forward everything readable from `reader` to `sink` until EOF, error or cancellation.
///
/// Read timeouts are retried so a cancelled token is noticed on idle sockets.
/// Returns the number of bytes forwarded.
pub fn pump<R: Read>(mut reader: R, source: &SourceId, sink: &RxSink, cancel: &CancelToken) -> u64 {
    let mut buf = [0u8; READ_CHUNK];
    let mut total = 0u64;
    while !cancel.is_cancelled() {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if sink.send_bytes(source, &buf[..n]).is_err() {
                    // Receiver dropped: nobody is plotting anymore.
                    return total;
                }
                total += n as u64;
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted) => {}
            Err(e) => {
                warn!(source = %source, error = %e, "read error");
                break;
            }
        }
    }
    info!(source = %source, bytes = total, "transport closed");
    let _ = sink.closed(source);
    total
}
