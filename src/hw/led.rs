// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Status LED driven by a single GPIO output.

use embedded_hal::digital::OutputPin;

/// Whether a line is asserted by driving/reading it high or low on the board wiring.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    High,
    Low,
}

impl ActiveLevel {
    /// True if a line that reads `is_high` is asserted under this polarity.
    #[inline]
    pub fn is_active(self, is_high: bool) -> bool {
        match self {
            ActiveLevel::High => is_high,
            ActiveLevel::Low => !is_high,
        }
    }
}

/// Logical LED state, independent of the wiring polarity.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedState {
    Off,
    On,
}

impl LedState {
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            LedState::Off => LedState::On,
            LedState::On => LedState::Off,
        }
    }
}

impl From<bool> for LedState {
    fn from(on: bool) -> Self {
        if on {
            LedState::On
        } else {
            LedState::Off
        }
    }
}

/// LED abstraction that remembers its active level and last commanded state.
///
/// The remembered state is the only source of truth for "is the LED on": it changes only through
/// [`Led::set`] and friends.
pub struct Led<PIN: OutputPin> {
    pin: PIN,
    active: ActiveLevel,
    state: LedState,
}

impl<PIN: OutputPin> Led<PIN> {
    /// Create an LED wrapper, initializing it to OFF.
    pub fn new(pin: PIN, active: ActiveLevel) -> Self {
        let mut led = Self {
            pin,
            active,
            state: LedState::Off,
        };
        led.set(LedState::Off);
        led
    }

    pub fn active_high(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    pub fn active_low(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    /// Drive the LED to `state`.
    pub fn set(&mut self, state: LedState) {
        let drive_high = match state {
            LedState::On => self.active == ActiveLevel::High,
            LedState::Off => self.active == ActiveLevel::Low,
        };
        if drive_high {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
        self.state = state;
    }

    #[inline]
    pub fn on(&mut self) {
        self.set(LedState::On);
    }

    #[inline]
    pub fn off(&mut self) {
        self.set(LedState::Off);
    }

    pub fn toggle(&mut self) {
        self.set(self.state.toggled());
    }

    #[inline]
    pub fn state(&self) -> LedState {
        self.state
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.state == LedState::On
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::vec::Vec;

    /// Output pin that records every level it is driven to.
    #[derive(Default)]
    pub struct RecordingPin {
        pub levels: Vec<bool>,
    }

    impl RecordingPin {
        pub fn level(&self) -> Option<bool> {
            self.levels.last().copied()
        }
    }

    impl embedded_hal::digital::ErrorType for RecordingPin {
        type Error = Infallible;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.levels.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.levels.push(true);
            Ok(())
        }
    }

    #[test]
    fn starts_off_for_both_polarities() {
        let low = Led::active_low(RecordingPin::default());
        assert_eq!(low.state(), LedState::Off);
        assert_eq!(low.free().level(), Some(true));

        let high = Led::active_high(RecordingPin::default());
        assert!(!high.is_on());
        assert_eq!(high.free().level(), Some(false));
    }

    #[test]
    fn active_low_drives_low_when_on() {
        let mut led = Led::active_low(RecordingPin::default());
        led.on();
        assert!(led.is_on());
        assert_eq!(led.free().level(), Some(false));
    }

    #[test]
    fn toggle_flips_state_and_line() {
        let mut led = Led::active_high(RecordingPin::default());
        led.toggle();
        assert_eq!(led.state(), LedState::On);
        led.toggle();
        assert_eq!(led.state(), LedState::Off);
        assert_eq!(led.free().levels, [false, true, false]);
    }

    #[test]
    fn active_level_interprets_samples() {
        assert!(ActiveLevel::Low.is_active(false));
        assert!(!ActiveLevel::Low.is_active(true));
        assert!(ActiveLevel::High.is_active(true));
    }
}
