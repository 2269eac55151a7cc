// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Requesting side of the LED handshake.
//!
//! On each press the board asks the peer for the opposite of its own LED state and waits for the
//! answer. The local LED only changes when the answer is exactly the confirmation for the request
//! that was sent. Anything else (wrong confirmation, empty or truncated line, link error) leaves
//! the LED alone.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! loop {
//!     if button.poll(&mut delay) {
//!         let outcome = requester.request_toggle(&mut delay);
//!     }
//!     delay.delay_ms(POLL_INTERVAL_MS);
//! }
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal_nb::serial::{Read, Write};

use crate::hw::{Led, LedState, LineChannel, LinkError};
use crate::protocol::{Command, FrameError};

/// Why an exchange never produced a usable response line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkFault {
    Serial,
    Overflow,
    Timeout,
}

impl<E> From<LinkError<E>> for LinkFault {
    fn from(e: LinkError<E>) -> Self {
        match e {
            LinkError::Serial(_) => LinkFault::Serial,
            LinkError::Frame(FrameError::Overflow) => LinkFault::Overflow,
            LinkError::Timeout => LinkFault::Timeout,
        }
    }
}

/// Result of one request/response cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Exchange {
    /// Peer confirmed; the LED is now in this state.
    Confirmed(LedState),
    /// Peer answered with something other than the expected confirmation.
    Rejected(Command),
    /// No response line could be obtained.
    LinkFailed(Command, LinkFault),
}

pub struct Requester<S, PIN: OutputPin, const N: usize> {
    channel: LineChannel<S, N>,
    led: Led<PIN>,
    /// `None` waits for the peer indefinitely.
    timeout_us: Option<u32>,
}

impl<S, PIN, const N: usize> Requester<S, PIN, N>
where
    S: Read<u8> + Write<u8>,
    PIN: OutputPin,
{
    pub fn new(channel: LineChannel<S, N>, led: Led<PIN>) -> Self {
        Self {
            channel,
            led,
            timeout_us: None,
        }
    }

    /// Bound the wait for the peer's response.
    pub fn with_timeout_ms(mut self, timeout_ms: Option<u32>) -> Self {
        self.timeout_us = timeout_ms.map(|ms| ms.saturating_mul(1_000));
        self
    }

    /// Ask the peer to flip the LED and apply the change if it confirms.
    pub fn request_toggle<D: DelayNs>(&mut self, delay: &mut D) -> Exchange {
        let cmd = Command::toggling(self.led.state());

        // A reply that missed an earlier deadline must not answer this request.
        if self.timeout_us.is_some() {
            let stale = self.channel.discard_pending();
            if stale > 0 {
                crate::log_debug!("dropped {=usize} stale bytes", stale);
            }
        }

        if self.channel.send(cmd.line()).is_err() {
            return Exchange::LinkFailed(cmd, LinkFault::Serial);
        }

        let response = match self.timeout_us {
            None => self.channel.receive(),
            Some(us) => self.channel.receive_within(delay, us),
        };

        match response {
            Ok(line) if cmd.is_confirmed_by(line.as_bytes()) => {
                self.led.set(cmd.target());
                Exchange::Confirmed(cmd.target())
            }
            Ok(_) => Exchange::Rejected(cmd),
            Err(e) => Exchange::LinkFailed(cmd, e.into()),
        }
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
