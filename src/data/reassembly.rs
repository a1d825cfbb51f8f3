//! Line reassembly: turns arbitrarily fragmented byte chunks into complete lines.
//!
//! A line is only ever produced once both its opening and its closing separator
//! have been seen. Bytes received before the first separator of a stream belong
//! to a line whose beginning was missed (e.g. the plotter attached mid-line), so
//! they are dropped instead of being parsed into a bogus value.

use std::collections::HashMap;

use memchr::memchr;

use super::SourceId;

/// Line separator byte (line feed).
pub const LINE_SEPARATOR: u8 = b'\n';

/// Received bytes for one source that have not been retired yet.
#[derive(Debug, Default)]
struct RawBuffer {
    bytes: Vec<u8>,
    /// Total number of bytes dropped from the front since the stream started.
    retired: u64,
}

impl RawBuffer {
    fn retire(&mut self, upto: usize) {
        if upto == 0 {
            return;
        }
        self.bytes.drain(..upto);
        self.retired += upto as u64;
    }
}

/// Per-source byte buffers and complete-line extraction.
#[derive(Debug, Default)]
pub struct LineReassembler {
    buffers: HashMap<SourceId, RawBuffer>,
}

impl LineReassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `bytes` to the buffer of `source` and return the complete lines now available.
    ///
    /// The returned iterator is lazy. Consumed bytes are retired from the buffer when it is
    /// dropped, so lines that were not pulled are yielded again by the next call.
    pub fn feed(&mut self, source: &SourceId, bytes: &[u8]) -> Lines<'_> {
        let buffer = self.buffers.entry(source.clone()).or_default();
        buffer.bytes.extend_from_slice(bytes);
        Lines {
            buffer,
            cursor: 0,
            retire_to: 0,
        }
    }

    /// Absolute stream offset up to which bytes of `source` have been retired.
    pub fn consumed_offset(&self, source: &SourceId) -> u64 {
        self.buffers.get(source).map_or(0, |b| b.retired)
    }

    /// Bytes of `source` still waiting for a closing separator.
    pub fn pending(&self, source: &SourceId) -> &[u8] {
        self.buffers
            .get(source)
            .map(|b| b.bytes.as_slice())
            .unwrap_or_default()
    }

    /// Forget the buffer of one source, including any incomplete line.
    pub fn remove_source(&mut self, source: &SourceId) {
        self.buffers.remove(source);
    }

    pub fn clear(&mut self) {
        self.buffers.clear();
    }
}

/// Complete lines extracted by one [`LineReassembler::feed`] call.
#[derive(Debug)]
pub struct Lines<'a> {
    buffer: &'a mut RawBuffer,
    cursor: usize,
    retire_to: usize,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let bytes = &self.buffer.bytes;
        let first = self.cursor + memchr(LINE_SEPARATOR, &bytes[self.cursor..])?;
        // Anything before an opening separator can never become a complete line.
        self.retire_to = first;
        let last = first + 1 + memchr(LINE_SEPARATOR, &bytes[first + 1..])?;
        let line = String::from_utf8_lossy(&bytes[first + 1..last]).into_owned();
        // The closing separator opens the next line.
        self.cursor = last;
        self.retire_to = last;
        Some(line)
    }
}

impl Drop for Lines<'_> {
    fn drop(&mut self) {
        self.buffer.retire(self.retire_to);
    }
}
