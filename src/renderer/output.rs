//! Output batching with padding barriers.
//!
//! Capability expansion may report padding delays between bytes. An
//! [`OutputBuffer`] records bytes and delays in order; a [`PaddedWriter`]
//! writes them out, flushing and sleeping at each delay so no later byte is
//! sent ahead of a padded chunk.

use std::io::{self, Write};
use std::time::Duration;

use crate::terminfo::Sink;

/// One piece of a render batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Chunk {
    Bytes(Vec<u8>),
    Delay(Duration),
}

/// Ordered bytes and delays.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    chunks: Vec<Chunk>,
}

impl OutputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        if let Some(Chunk::Bytes(last)) = self.chunks.last_mut() {
            last.extend_from_slice(bytes);
        } else {
            self.chunks.push(Chunk::Bytes(bytes.to_vec()));
        }
    }

    pub fn push_delay(&mut self, delay: Duration) {
        if let Some(Chunk::Delay(last)) = self.chunks.last_mut() {
            *last += delay;
        } else if !delay.is_zero() {
            self.chunks.push(Chunk::Delay(delay));
        }
    }

    /// Append another buffer, preserving order.
    pub fn append(&mut self, other: &mut Self) {
        for chunk in other.chunks.drain(..) {
            match chunk {
                Chunk::Bytes(bytes) => self.push_bytes(&bytes),
                Chunk::Delay(delay) => self.push_delay(delay),
            }
        }
    }

    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total bytes, ignoring delays.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.chunks
            .iter()
            .map(|c| match c {
                Chunk::Bytes(b) => b.len(),
                Chunk::Delay(_) => 0,
            })
            .sum()
    }

    /// All bytes concatenated, ignoring delays.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        for chunk in &self.chunks {
            if let Chunk::Bytes(b) = chunk {
                out.extend_from_slice(b);
            }
        }
        out
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }
}

impl Sink for OutputBuffer {
    fn bytes(&mut self, bytes: &[u8]) {
        self.push_bytes(bytes);
    }

    fn delay(&mut self, delay: Duration) {
        self.push_delay(delay);
    }
}

/// Writer honoring the delays in an [`OutputBuffer`].
#[derive(Debug)]
pub struct PaddedWriter<W: Write> {
    inner: W,
    sleep: bool,
    bytes_written: u64,
}

impl<W: Write> PaddedWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            sleep: true,
            bytes_written: 0,
        }
    }

    /// Skip sleeping at delays (they still flush).
    #[must_use]
    pub fn without_sleep(mut self) -> Self {
        self.set_sleep(false);
        self
    }

    pub fn set_sleep(&mut self, sleep: bool) {
        self.sleep = sleep;
    }

    /// Write a batch with one `write_all` per byte chunk.
    pub fn write_batch(&mut self, batch: &OutputBuffer) -> io::Result<usize> {
        let mut written = 0;
        for chunk in batch.chunks() {
            match chunk {
                Chunk::Bytes(bytes) => {
                    self.inner.write_all(bytes)?;
                    written += bytes.len();
                }
                Chunk::Delay(delay) => {
                    self.inner.flush()?;
                    if self.sleep {
                        std::thread::sleep(*delay);
                    }
                }
            }
        }
        self.bytes_written += written as u64;
        Ok(written)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    #[must_use]
    pub const fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }
}
