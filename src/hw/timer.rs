// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Register-level seam between the PWM math and a hardware timer channel.
//!
//! Implementations program one capture/compare channel of one timer. The board layer implements
//! this for TIM1_CH1 (advanced timer, needs MOE) and TIM2_CH1 (general-purpose, 32-bit).

pub trait PwmTimer {
    /// Largest value the prescaler register holds.
    const MAX_PRESCALER: u32 = 0xFFFF;
    /// Largest value the auto-reload register holds.
    const MAX_PERIOD: u32;

    /// Stop the counter and program PSC/ARR/CCR in that order.
    fn program(&mut self, prescaler: u32, period: u32, compare: u32);

    /// PWM mode 1 on the channel with output-compare preload, channel output enabled, and the
    /// main output enabled where the timer has one.
    fn enable_pwm_output(&mut self);

    /// Enable auto-reload preload, latch the shadow registers with an update event, start
    /// counting.
    fn start(&mut self);

    /// Write the compare register. With preload on, the value applies at the next update event.
    fn set_compare(&mut self, compare: u32);

    /// The compare value most recently written.
    fn compare(&self) -> u32;
}
