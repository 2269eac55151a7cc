// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Peer side of the LED handshake.
//!
//! Waits for a request line, drives its own LED to the requested state and answers with the
//! matching confirmation. Lines that are not a known request get no answer, so the requesting
//! board sees nothing it could mistake for a confirmation.

use embedded_hal::digital::OutputPin;
use embedded_hal_nb::serial::{Read, Write};

use crate::hw::{Led, LedState, LineChannel, LinkError};
use crate::protocol::Command;

pub struct Responder<S, PIN: OutputPin, const N: usize> {
    channel: LineChannel<S, N>,
    led: Led<PIN>,
}

impl<S, PIN, const N: usize> Responder<S, PIN, N>
where
    S: Read<u8> + Write<u8>,
    PIN: OutputPin,
{
    pub fn new(channel: LineChannel<S, N>, led: Led<PIN>) -> Self {
        Self { channel, led }
    }

    /// Handle one incoming line. Blocks until a non-empty line arrives; empty lines (the second
    /// half of a CRLF) are skipped.
    ///
    /// Returns the executed command, or `None` if the line was not a request.
    pub fn serve_once(&mut self) -> Result<Option<Command>, LinkError<S::Error>> {
        let line = loop {
            let line = self.channel.receive()?;
            if !line.is_empty() {
                break line;
            }
        };
        let Some(cmd) = Command::parse(line.as_bytes()) else {
            return Ok(None);
        };

        self.led.set(cmd.target());
        self.channel
            .send(cmd.confirmation())
            .map_err(LinkError::Serial)?;
        Ok(Some(cmd))
    }

    #[inline]
    pub fn led_state(&self) -> LedState {
        self.led.state()
    }

    #[inline]
    pub fn channel_mut(&mut self) -> &mut LineChannel<S, N> {
        &mut self.channel
    }

    pub fn free(self) -> (LineChannel<S, N>, Led<PIN>) {
        (self.channel, self.led)
    }
}
