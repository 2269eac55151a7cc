// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line protocol spoken between the button board and its peer.
//!
//! Every message is one ASCII line. The requesting board sends a [`Command`]; the peer executes it
//! and answers with the matching confirmation line.

use crate::hw::LedState;

/// Line terminators accepted on receive. Either one ends a line.
pub const LF: u8 = b'\n';
pub const CR: u8 = b'\r';

// Requests (button board -> peer)
pub const REQUEST_ON: &str = "M LED ON\n";
pub const REQUEST_OFF: &str = "M LED OFF\n";

// Confirmations (peer -> button board)
pub const CONFIRM_ON: &str = "S LED ON\n";
pub const CONFIRM_OFF: &str = "S LED OFF\n";

#[inline]
pub fn is_terminator(byte: u8) -> bool {
    byte == LF || byte == CR
}

/// Strip the single trailing terminator of a wire constant.
fn payload(line: &str) -> &[u8] {
    let bytes = line.as_bytes();
    match bytes.split_last() {
        Some((&last, rest)) if is_terminator(last) => rest,
        _ => bytes,
    }
}

/// Requests understood by the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    LedOn,
    LedOff,
}

impl Command {
    /// The request that moves an LED currently in `current` to the opposite state.
    pub fn toggling(current: LedState) -> Self {
        match current {
            LedState::On => Command::LedOff,
            LedState::Off => Command::LedOn,
        }
    }

    /// LED state the command asks for.
    pub fn target(self) -> LedState {
        match self {
            Command::LedOn => LedState::On,
            Command::LedOff => LedState::Off,
        }
    }

    /// Wire form, terminator included.
    pub fn line(self) -> &'static str {
        match self {
            Command::LedOn => REQUEST_ON,
            Command::LedOff => REQUEST_OFF,
        }
    }

    /// Confirmation line the peer must send back for this command.
    pub fn confirmation(self) -> &'static str {
        match self {
            Command::LedOn => CONFIRM_ON,
            Command::LedOff => CONFIRM_OFF,
        }
    }

    /// Exact, byte-for-byte check of a received line (terminator already stripped).
    pub fn is_confirmed_by(self, received: &[u8]) -> bool {
        received == payload(self.confirmation())
    }

    /// Decode a received request line (terminator already stripped).
    pub fn parse(received: &[u8]) -> Option<Self> {
        [Command::LedOn, Command::LedOff]
            .into_iter()
            .find(|cmd| received == payload(cmd.line()))
    }
}
