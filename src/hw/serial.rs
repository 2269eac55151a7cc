// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line-framed serial channel.
//!
//! Wraps any `embedded-hal-nb` UART. Transmit and receive both busy-wait one byte at a time, which
//! is the only waiting primitive the firmware uses.
//!
//! Note: [`LineChannel::receive`] has no timeout. If the peer never sends a terminator, the caller
//! stays blocked. [`LineChannel::receive_within`] is the bounded alternative.

use embedded_hal::delay::DelayNs;
use embedded_hal_nb::serial::{Read, Write};
use nb::block;

use crate::protocol::{FrameError, Line, LineFramer};

/// Spacing between receive polls in [`LineChannel::receive_within`]. Well under one character time
/// at 9600 baud, so a single-byte receive register cannot overrun while we wait.
const POLL_STEP_US: u32 = 50;

/// Upper bound on bytes dropped by one [`LineChannel::discard_pending`] call, so a peer that never
/// stops talking cannot stall the caller.
pub const MAX_DISCARD: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError<E> {
    /// UART reported a receive or transmit error.
    Serial(E),
    /// Received line could not be framed.
    Frame(FrameError),
    /// No complete line arrived before the deadline.
    Timeout,
}

impl<E> From<FrameError> for LinkError<E> {
    fn from(e: FrameError) -> Self {
        LinkError::Frame(e)
    }
}

pub struct LineChannel<S, const N: usize> {
    serial: S,
    framer: LineFramer<N>,
}

impl<S, const N: usize> LineChannel<S, N>
where
    S: Read<u8> + Write<u8>,
{
    pub fn new(serial: S) -> Self {
        Self {
            serial,
            framer: LineFramer::new(),
        }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) -> Result<(), S::Error> {
        block!(self.serial.write(b))
    }

    /// Send `line` verbatim. No terminator is added; callers pass complete lines.
    pub fn send(&mut self, line: &str) -> Result<(), S::Error> {
        for &b in line.as_bytes() {
            self.write_byte(b)?;
        }
        Ok(())
    }

    /// Block until the hardware TX drain is flushed.
    #[inline]
    pub fn flush(&mut self) -> Result<(), S::Error> {
        block!(self.serial.flush())
    }

    /// Block until one full line has been received.
    ///
    /// Reads stop at the terminator, so bytes after it stay in the UART for the next call.
    pub fn receive(&mut self) -> Result<Line<N>, LinkError<S::Error>> {
        self.framer.reset();
        loop {
            let byte = block!(self.serial.read()).map_err(LinkError::Serial)?;
            if let Some(line) = self.framer.push(byte) {
                return line.map_err(LinkError::from);
            }
        }
    }

    /// Like [`receive`](Self::receive), but gives up after `timeout_us`.
    pub fn receive_within<D: DelayNs>(
        &mut self,
        delay: &mut D,
        timeout_us: u32,
    ) -> Result<Line<N>, LinkError<S::Error>> {
        self.framer.reset();
        let mut waited_us = 0u32;
        loop {
            match self.serial.read() {
                Ok(byte) => {
                    if let Some(line) = self.framer.push(byte) {
                        return line.map_err(LinkError::from);
                    }
                }
                Err(nb::Error::WouldBlock) => {
                    if waited_us >= timeout_us {
                        self.framer.reset();
                        return Err(LinkError::Timeout);
                    }
                    delay.delay_us(POLL_STEP_US);
                    waited_us = waited_us.saturating_add(POLL_STEP_US);
                }
                Err(nb::Error::Other(e)) => return Err(LinkError::Serial(e)),
            }
        }
    }

    /// Throw away whatever the UART has already received, along with any partial line.
    ///
    /// Reads until the receiver is empty, at most [`MAX_DISCARD`] times. Receive errors are
    /// skipped. Returns the number of bytes dropped.
    pub fn discard_pending(&mut self) -> usize {
        self.framer.reset();
        let mut dropped = 0;
        for _ in 0..MAX_DISCARD {
            match self.serial.read() {
                Ok(_) => dropped += 1,
                Err(nb::Error::Other(_)) => {}
                Err(nb::Error::WouldBlock) => break,
            }
        }
        dropped
    }

    /// Access the underlying UART.
    #[inline]
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    pub fn free(self) -> S {
        self.serial
    }
}
