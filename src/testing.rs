// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host-side doubles shared by the unit tests: a simulated clock, a delay that advances it, and an
//! input pin whose level is a function of simulated time.

use core::convert::Infallible;
use std::cell::Cell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin};

/// Shared simulated time in nanoseconds.
#[derive(Clone, Default)]
pub struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub fn advance_ns(&self, ns: u64) {
        self.0.set(self.0.get() + ns);
    }

    pub fn now_us(&self) -> u64 {
        self.0.get() / 1_000
    }
}

/// Delay that only moves the simulated clock.
pub struct SimDelay {
    pub clock: SimClock,
    pub calls: Vec<u32>,
}

impl SimDelay {
    pub fn new() -> Self {
        Self::on(SimClock::default())
    }

    pub fn on(clock: SimClock) -> Self {
        Self {
            clock,
            calls: Vec::new(),
        }
    }

    pub fn now_us(&self) -> u64 {
        self.clock.now_us()
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_ns(u64::from(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
        self.clock.advance_ns(u64::from(ms) * 1_000_000);
    }
}

/// Input pin driven by a list of `(time_us, is_high)` edges, sorted by time.
///
/// Every sample costs `sample_cost_ns` of simulated time, so a tight polling loop still makes
/// progress through the waveform.
pub struct WaveformPin {
    clock: SimClock,
    initial_high: bool,
    edges: Vec<(u64, bool)>,
    sample_cost_ns: u64,
    pub samples: usize,
}

impl WaveformPin {
    pub fn new(clock: SimClock, initial_high: bool, edges: &[(u64, bool)]) -> Self {
        Self {
            clock,
            initial_high,
            edges: edges.to_vec(),
            sample_cost_ns: 5_000,
            samples: 0,
        }
    }

    fn level(&self) -> bool {
        let now = self.clock.now_us();
        self.edges
            .iter()
            .take_while(|(t, _)| *t <= now)
            .last()
            .map_or(self.initial_high, |&(_, high)| high)
    }

    fn sample(&mut self) -> bool {
        let high = self.level();
        self.samples += 1;
        self.clock.advance_ns(self.sample_cost_ns);
        high
    }
}

impl ErrorType for WaveformPin {
    type Error = Infallible;
}

impl InputPin for WaveformPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.sample())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.sample())
    }
}
