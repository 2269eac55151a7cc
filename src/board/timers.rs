// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! PWM output on TIM1_CH1 and TIM2_CH1 through direct PAC register access.
//!
//! Both channels run in PWM mode 1 with CCR1 and ARR preloaded, so new compare values take effect
//! at the next update event. TIM1 is an advanced timer: its outputs stay off until BDTR.MOE is
//! set.

use stm32f7xx_hal::{
    gpio::{gpioa, Alternate},
    pac,
};

use crate::hw::PwmTimer;

// CCMR1 output-compare fields for channel 1
const OC1M_MASK: u32 = 0b111 << 4;
const OC1M_PWM1: u32 = 0b110 << 4;
const OC1PE: u32 = 1 << 3;
// CCER
const CC1E: u32 = 1 << 0;
// BDTR
const MOE: u32 = 1 << 15;
// CR1
const CEN: u32 = 1 << 0;
const ARPE: u32 = 1 << 7;
// EGR
const UG: u32 = 1 << 0;

/// Motor PWM: TIM1 channel 1 on PA8.
pub struct Tim1Ch1 {
    tim: pac::TIM1,
    _pin: gpioa::PA8<Alternate<1>>,
}

impl Tim1Ch1 {
    pub fn new(tim1: pac::TIM1, pin: gpioa::PA8<Alternate<1>>) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.tim1en().set_bit());
        Self { tim: tim1, _pin: pin }
    }

    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> pac::TIM1 {
        self.tim
    }
}

impl PwmTimer for Tim1Ch1 {
    const MAX_PERIOD: u32 = 0xFFFF;

    fn program(&mut self, prescaler: u32, period: u32, compare: u32) {
        let tim = &self.tim;
        tim.cr1.modify(|r, w| unsafe { w.bits(r.bits() & !CEN) });
        tim.psc.write(|w| unsafe { w.bits(prescaler) });
        tim.arr.write(|w| unsafe { w.bits(period) });
        tim.ccr1.write(|w| unsafe { w.bits(compare) });
    }

    fn enable_pwm_output(&mut self) {
        let tim = &self.tim;
        tim.ccmr1_output()
            .modify(|r, w| unsafe { w.bits((r.bits() & !OC1M_MASK) | OC1M_PWM1 | OC1PE) });

        // Main output only, no complementary output
        tim.ccer.write(|w| unsafe { w.bits(CC1E) });

        // No dead-time, no break; outputs enabled
        tim.bdtr.write(|w| unsafe { w.bits(MOE) });
    }

    fn start(&mut self) {
        let tim = &self.tim;
        tim.cr1.modify(|r, w| unsafe { w.bits(r.bits() | ARPE) });
        tim.egr.write(|w| unsafe { w.bits(UG) });
        tim.cr1.modify(|r, w| unsafe { w.bits(r.bits() | CEN) });
    }

    #[inline]
    fn set_compare(&mut self, compare: u32) {
        self.tim.ccr1.write(|w| unsafe { w.bits(compare) });
    }

    #[inline]
    fn compare(&self) -> u32 {
        self.tim.ccr1.read().bits()
    }
}

/// Servo PWM: TIM2 channel 1 on PA15. TIM2 is 32-bit.
pub struct Tim2Ch1 {
    tim: pac::TIM2,
    _pin: gpioa::PA15<Alternate<1>>,
}

impl Tim2Ch1 {
    pub fn new(tim2: pac::TIM2, pin: gpioa::PA15<Alternate<1>>) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());
        Self { tim: tim2, _pin: pin }
    }

    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> pac::TIM2 {
        self.tim
    }
}

impl PwmTimer for Tim2Ch1 {
    const MAX_PERIOD: u32 = 0xFFFF_FFFF;

    fn program(&mut self, prescaler: u32, period: u32, compare: u32) {
        let tim = &self.tim;
        tim.cr1.modify(|r, w| unsafe { w.bits(r.bits() & !CEN) });
        tim.psc.write(|w| unsafe { w.bits(prescaler) });
        tim.arr.write(|w| unsafe { w.bits(period) });
        tim.ccr1.write(|w| unsafe { w.bits(compare) });
    }

    fn enable_pwm_output(&mut self) {
        let tim = &self.tim;
        tim.ccmr1_output()
            .modify(|r, w| unsafe { w.bits((r.bits() & !OC1M_MASK) | OC1M_PWM1 | OC1PE) });
        tim.ccer.write(|w| unsafe { w.bits(CC1E) });
    }

    fn start(&mut self) {
        let tim = &self.tim;
        tim.cr1.modify(|r, w| unsafe { w.bits(r.bits() | ARPE) });
        tim.egr.write(|w| unsafe { w.bits(UG) });
        tim.cr1.modify(|r, w| unsafe { w.bits(r.bits() | CEN) });
    }

    #[inline]
    fn set_compare(&mut self, compare: u32) {
        self.tim.ccr1.write(|w| unsafe { w.bits(compare) });
    }

    #[inline]
    fn compare(&self) -> u32 {
        self.tim.ccr1.read().bits()
    }
}
