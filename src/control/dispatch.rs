// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! One pass of the firmware's polling loop for the button-driven roles.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_nb::serial::{Read, Write};

use crate::control::handshake::{Exchange, Requester};
use crate::hw::{DebouncedButton, Led, LedState};

/// Poll the button; on a press run one request/response exchange.
pub fn request_on_press<B, S, PIN, D, const N: usize>(
    button: &mut DebouncedButton<B>,
    requester: &mut Requester<S, PIN, N>,
    delay: &mut D,
) -> Option<Exchange>
where
    B: InputPin,
    S: Read<u8> + Write<u8>,
    PIN: OutputPin,
    D: DelayNs,
{
    if !button.poll(delay) {
        return None;
    }
    crate::log_info!("press");

    let outcome = requester.request_toggle(delay);
    match outcome {
        Exchange::Confirmed(state) => crate::log_info!("peer confirmed, LED {}", state),
        Exchange::Rejected(cmd) => crate::log_warn!("peer did not confirm {}", cmd),
        Exchange::LinkFailed(cmd, fault) => {
            crate::log_warn!("no response to {}: {}", cmd, fault)
        }
    }
    Some(outcome)
}

/// Poll the button; on a press flip the LED locally. Used when no peer is attached.
pub fn toggle_on_press<B, PIN, D>(
    button: &mut DebouncedButton<B>,
    led: &mut Led<PIN>,
    delay: &mut D,
) -> Option<LedState>
where
    B: InputPin,
    PIN: OutputPin,
    D: DelayNs,
{
    if !button.poll(delay) {
        return None;
    }
    led.toggle();
    crate::log_info!("press, LED {}", led.state());
    Some(led.state())
}
