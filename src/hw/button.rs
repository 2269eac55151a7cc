// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Debounced push-button input.
//!
//! A press is reported once the button has been pressed, released, and the line has been left
//! alone for a settle delay. Contact chatter on release falls inside the settle window and is
//! never sampled. The caller is blocked for the whole press, which is fine for a single polling
//! loop.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::hw::ActiveLevel;

/// Internal bias applied to the button line at pin configuration time.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None,
    Up,
    Down,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    Idle,
    Pressed,
    Released,
}

pub struct DebouncedButton<PIN: InputPin> {
    pin: PIN,
    active: ActiveLevel,
    settle_ms: u32,
    state: ButtonState,
}

impl<PIN: InputPin> DebouncedButton<PIN> {
    pub fn new(pin: PIN, active: ActiveLevel, settle_ms: u32) -> Self {
        Self {
            pin,
            active,
            settle_ms,
            state: ButtonState::Idle,
        }
    }

    /// Sample the line once. A read error counts as "not pressed".
    #[inline]
    pub fn is_active(&mut self) -> bool {
        self.pin
            .is_high()
            .map(|high| self.active.is_active(high))
            .unwrap_or(false)
    }

    /// Check the button and, if it is held, wait out the press.
    ///
    /// Returns `false` immediately when the button is idle. Otherwise blocks until release plus
    /// the settle delay and returns `true`: exactly one event per physical press.
    pub fn poll<D: DelayNs>(&mut self, delay: &mut D) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = ButtonState::Pressed;

        while self.is_active() {}
        self.state = ButtonState::Released;

        delay.delay_ms(self.settle_ms);
        self.state = ButtonState::Idle;
        true
    }

    #[inline]
    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{SimClock, SimDelay, WaveformPin};

    const SETTLE_MS: u32 = 20;

    /// Run the polling loop for `duration_us`, sleeping 1 ms between polls. Returns the number of
    /// presses reported.
    fn count_presses(
        button: &mut DebouncedButton<WaveformPin>,
        delay: &mut SimDelay,
        duration_us: u64,
    ) -> usize {
        let mut presses = 0;
        while delay.now_us() < duration_us {
            if button.poll(delay) {
                presses += 1;
            }
            delay.delay_ms(1);
        }
        presses
    }

    #[test]
    fn idle_line_reports_nothing_and_does_not_block() {
        let clock = SimClock::default();
        let pin = WaveformPin::new(clock.clone(), true, &[]);
        let mut delay = SimDelay::on(clock);
        let mut button = DebouncedButton::new(pin, ActiveLevel::Low, SETTLE_MS);

        assert!(!button.poll(&mut delay));
        assert_eq!(button.state(), ButtonState::Idle);
        assert!(delay.calls.is_empty());
    }

    #[test]
    fn clean_press_active_low_reports_once() {
        let clock = SimClock::default();
        let pin = WaveformPin::new(clock.clone(), true, &[(10_000, false), (60_000, true)]);
        let mut delay = SimDelay::on(clock);
        let mut button = DebouncedButton::new(pin, ActiveLevel::Low, SETTLE_MS);

        assert_eq!(count_presses(&mut button, &mut delay, 300_000), 1);
    }

    #[test]
    fn press_blocks_until_release_then_settles() {
        let clock = SimClock::default();
        let pin = WaveformPin::new(clock.clone(), false, &[(0, true), (40_000, false)]);
        let mut delay = SimDelay::on(clock);
        let mut button = DebouncedButton::new(pin, ActiveLevel::High, SETTLE_MS);

        assert!(button.poll(&mut delay));
        assert_eq!(delay.calls, [SETTLE_MS]);
        assert!(delay.now_us() >= 40_000 + u64::from(SETTLE_MS) * 1_000);
        assert_eq!(button.state(), ButtonState::Idle);
    }

    #[test]
    fn release_chatter_inside_settle_window_is_one_press() {
        let clock = SimClock::default();
        let pin = WaveformPin::new(
            clock.clone(),
            true,
            &[
                (5_000, false),
                (50_000, true),
                (51_000, false),
                (52_500, true),
                (53_000, false),
                (55_000, true),
            ],
        );
        let mut delay = SimDelay::on(clock);
        let mut button = DebouncedButton::new(pin, ActiveLevel::Low, SETTLE_MS);

        assert_eq!(count_presses(&mut button, &mut delay, 400_000), 1);
    }

    #[test]
    fn two_separate_presses_are_two_events() {
        let clock = SimClock::default();
        let pin = WaveformPin::new(
            clock.clone(),
            true,
            &[
                (5_000, false),
                (30_000, true),
                (150_000, false),
                (200_000, true),
            ],
        );
        let mut delay = SimDelay::on(clock);
        let mut button = DebouncedButton::new(pin, ActiveLevel::Low, SETTLE_MS);

        assert_eq!(count_presses(&mut button, &mut delay, 400_000), 2);
    }
}
