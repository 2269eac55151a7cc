// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Peripheral Abstractions
//!
//! Hardware-agnostic wrappers written against `embedded-hal` 1.0 and `embedded-hal-nb` traits, so
//! they run unchanged on the board and in host tests. Chip bindings live in `board`.

pub mod button;
pub mod led;
pub mod pwm;
pub mod serial;
pub mod timer;

pub use button::{DebouncedButton, Pull};
pub use led::{ActiveLevel, Led, LedState};
pub use pwm::{PulseRange, PwmChannel, PwmTiming, Servo, TimingError};
pub use serial::{LineChannel, LinkError};
pub use timer::PwmTimer;
