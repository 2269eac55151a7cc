// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod framer;
pub mod messages;

pub use framer::{FrameError, Line, LineFramer};
pub use messages::Command;
