// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Blocking delay on TIM3.
//!
//! TIM3 is clocked down to a 1 MHz tick and run one-shot per chunk: load ARR, force an update,
//! count, then spin on the update flag. TIM3 is 16-bit, so long delays are split into chunks.

use embedded_hal::delay::DelayNs;
use stm32f7xx_hal::pac;

const TICK_HZ: u32 = 1_000_000;
const MAX_CHUNK_US: u32 = 0xFFFF;
const MAX_MS_PER_CALL: u32 = 60_000;

const CEN: u32 = 1 << 0;
const OPM: u32 = 1 << 3;
const UIF: u32 = 1 << 0;
const UG: u32 = 1 << 0;

pub struct Tim3Delay {
    tim: pac::TIM3,
}

impl Tim3Delay {
    /// Configure TIM3 for 1 us ticks from `timer_clock_hz`.
    pub fn new(tim3: pac::TIM3, timer_clock_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim3en().set_bit());

        let tim = tim3;
        tim.cr1.write(|w| unsafe { w.bits(OPM) });
        let prescaler = (timer_clock_hz / TICK_HZ).saturating_sub(1);
        tim.psc.write(|w| unsafe { w.bits(prescaler) });

        Self { tim }
    }

    /// Busy-wait for `us` microseconds.
    pub fn wait_us(&mut self, mut us: u32) {
        while us > 0 {
            let chunk = us.min(MAX_CHUNK_US);
            self.one_shot(chunk);
            us -= chunk;
        }
    }

    fn one_shot(&mut self, ticks: u32) {
        let tim = &self.tim;
        tim.arr.write(|w| unsafe { w.bits(ticks - 1) });
        tim.cnt.write(|w| unsafe { w.bits(0) });

        // Latch PSC/ARR; UG also raises UIF, which is cleared before counting.
        tim.egr.write(|w| unsafe { w.bits(UG) });
        tim.sr.write(|w| unsafe { w.bits(!UIF) });

        tim.cr1.modify(|r, w| unsafe { w.bits(r.bits() | CEN) });
        while tim.sr.read().bits() & UIF == 0 {}
        tim.sr.write(|w| unsafe { w.bits(!UIF) });
        tim.cr1.modify(|r, w| unsafe { w.bits(r.bits() & !CEN) });
    }

    #[inline]
    pub fn free(self) -> pac::TIM3 {
        self.tim
    }
}

impl DelayNs for Tim3Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.wait_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.wait_us(us);
    }

    fn delay_ms(&mut self, mut ms: u32) {
        while ms > 0 {
            let step = ms.min(MAX_MS_PER_CALL);
            self.wait_us(step * 1_000);
            ms -= step;
        }
    }
}
