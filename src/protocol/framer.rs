// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Byte-at-a-time line framer.
//!
//! Bytes are pushed as they arrive from the UART. A `\n` or `\r` ends the line; the terminator is
//! not stored. The buffer never grows past `N` bytes: an oversized line is dropped up to its
//! terminator and reported as [`FrameError::Overflow`], which leaves the stream aligned on the next
//! line.

use heapless::Vec;

use crate::protocol::messages::is_terminator;

/// One received line, terminator stripped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line<const N: usize> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> Line<N> {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The line as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// The line did not fit in the receive buffer. Its bytes were discarded.
    Overflow,
}

enum State {
    Collecting,
    Discarding,
}

pub struct LineFramer<const N: usize> {
    state: State,
    buf: Vec<u8, N>,
}

impl<const N: usize> LineFramer<N> {
    pub const fn new() -> Self {
        Self {
            state: State::Collecting,
            buf: Vec::new(),
        }
    }

    /// Process a single incoming byte. Returns `Some` once a terminator closes the line.
    pub fn push(&mut self, byte: u8) -> Option<Result<Line<N>, FrameError>> {
        match self.state {
            State::Collecting => {
                if is_terminator(byte) {
                    let bytes = core::mem::take(&mut self.buf);
                    return Some(Ok(Line { bytes }));
                }
                if self.buf.push(byte).is_err() {
                    self.buf.clear();
                    self.state = State::Discarding;
                }
            }
            State::Discarding => {
                if is_terminator(byte) {
                    self.state = State::Collecting;
                    return Some(Err(FrameError::Overflow));
                }
            }
        }
        None
    }

    /// Drop any partial line.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.state = State::Collecting;
    }

    /// Bytes buffered for the line in progress.
    #[inline]
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

impl<const N: usize> Default for LineFramer<N> {
    fn default() -> Self {
        Self::new()
    }
}
