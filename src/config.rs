// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time configuration.
//!
//! Board wiring differs between revisions (LED active-low on one, active-high on another, button
//! with or without the internal pull-up), so polarity lives here instead of in the drivers.

use crate::hw::{ActiveLevel, Pull};

/// Which side of the link this firmware plays.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Button board: sends requests and waits for the peer's confirmation.
    Requester,
    /// Peer board: executes requests and confirms them.
    Responder,
    /// No peer attached: the button toggles the LED directly.
    Standalone,
}

#[cfg(feature = "responder")]
pub const ROLE: Role = Role::Responder;
#[cfg(all(feature = "standalone", not(feature = "responder")))]
pub const ROLE: Role = Role::Standalone;
#[cfg(not(any(feature = "responder", feature = "standalone")))]
pub const ROLE: Role = Role::Requester;

// Clocks. Default clock tree: HSI, AHB/APB prescalers 1, so every timer runs at SYSCLK.
pub const SYSCLK_HZ: u32 = 16_000_000;

// Serial link
pub const UART_BAUD: u32 = 9_600;
/// Payload bytes kept per received line (terminator excluded).
pub const RESPONSE_CAPACITY: usize = 20;
/// `None` blocks until the peer answers.
pub const RESPONSE_TIMEOUT_MS: Option<u32> = None;

// Digital I/O
pub const LED_ACTIVE: ActiveLevel = ActiveLevel::Low;
pub const BUTTON_ACTIVE: ActiveLevel = ActiveLevel::Low;
pub const BUTTON_PULL: Pull = Pull::Up;

// Timing
pub const DEBOUNCE_SETTLE_MS: u32 = 20;
pub const POLL_INTERVAL_MS: u32 = 100;

// Motor PWM (TIM1_CH1)
pub const MOTOR_PWM_HZ: u32 = 1_000;
pub const MOTOR_TICK_HZ: u32 = 1_000_000;

// Servo PWM (TIM2_CH1)
pub const SERVO_PWM_HZ: u32 = 50;
pub const SERVO_TICK_HZ: u32 = 1_000_000;
pub const SERVO_MIN_PULSE_US: u32 = 544;
pub const SERVO_MAX_PULSE_US: u32 = 2_400;

/// Run the actuator sweep once at boot.
pub const SWEEP_ON_BOOT: bool = true;
pub const SWEEP_DWELL_MS: u32 = 500;
