// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Application Logic
//!
//! ## Modules
//!
//! - [`handshake`] - Requesting side: press -> request -> confirmed LED change.
//! - [`responder`] - Peer side: execute a request and confirm it.
//! - [`dispatch`] - One pass of the polling loop for the button-driven roles.
//! - [`sweep`] - Fixed duty/angle schedule for checking the PWM outputs.

pub mod dispatch;
pub mod handshake;
pub mod responder;
pub mod sweep;

pub use handshake::{Exchange, LinkFault, Requester};
pub use responder::Responder;
