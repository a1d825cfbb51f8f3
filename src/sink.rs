//! Channel types for handing received bytes from transports to the plotter.
//!
//! Each transport owns a cloned [`RxSink`] and sends one [`RxCommand::Rx`] per received
//! chunk. The receiving side applies commands to a [`PlotSession`](crate::session::PlotSession)
//! in channel order, so chunks of one source are never reordered.

use std::sync::mpsc::{Receiver, SendError, Sender};

use crate::data::SourceId;

/// Messages sent over the channel to drive a session.
#[derive(Debug, Clone)]
pub enum RxCommand {
    /// A source came up. `name` is a human readable label if the transport has one.
    Connected { source: SourceId, name: Option<String> },
    /// A chunk of raw bytes, in stream order for its source.
    Rx { source: SourceId, bytes: Vec<u8> },
    /// The source stopped delivering data.
    Closed { source: SourceId },
}

impl RxCommand {
    pub fn source(&self) -> &SourceId {
        match self {
            RxCommand::Connected { source, .. } | RxCommand::Rx { source, .. } | RxCommand::Closed { source } => {
                source
            }
        }
    }
}

/// Convenience sender for feeding bytes into the plotter.
#[derive(Debug, Clone)]
pub struct RxSink {
    tx: Sender<RxCommand>,
}

impl RxSink {
    pub fn connected(&self, source: &SourceId, name: Option<String>) -> Result<(), SendError<RxCommand>> {
        self.tx.send(RxCommand::Connected {
            source: source.clone(),
            name,
        })
    }

    /// Send one received chunk for `source`.
    pub fn send_bytes<B>(&self, source: &SourceId, bytes: B) -> Result<(), SendError<RxCommand>>
    where
        B: Into<Vec<u8>>,
    {
        self.tx.send(RxCommand::Rx {
            source: source.clone(),
            bytes: bytes.into(),
        })
    }

    pub fn closed(&self, source: &SourceId) -> Result<(), SendError<RxCommand>> {
        self.tx.send(RxCommand::Closed { source: source.clone() })
    }
}

/// Create a new channel pair: `(RxSink, Receiver<RxCommand>)`.
pub fn channel_rx() -> (RxSink, Receiver<RxCommand>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (RxSink { tx }, rx)
}
