// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # peerlink Firmware
//!
//! Firmware for a two-board setup: a button on one board asks its peer over a UART line protocol
//! to switch an LED, and the local LED follows only once the peer confirms. The same board drives a
//! DC motor and a hobby servo from timer PWM channels.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | Peripheral abstractions (LED, debounced button, line-framed UART, PWM, servo) |
//! | [`protocol`] | Wire messages and the line framer |
//! | [`control`] | Request/confirm handshake, peer responder, PWM test sweep |
//! | [`config`] | Compile-time configuration |
//! | `board` | STM32F7 bindings (`board` feature) |
//!
//! Everything outside `board` is written against `embedded-hal` traits and is tested on the host.
//!
//! ## Getting Started
//!
//! Run the tests on the host:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board (add `--features board,responder` for the peer):
//!
//! ```bash
//! cargo run --release --features board --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod logging;

pub mod config;
pub mod control;
pub mod hw;
pub mod protocol;

#[cfg(feature = "board")]
pub mod board;

#[cfg(test)]
mod testing;
