// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the peerlink wiring.
//!
//! | Signal | Pin | Function |
//! | ------ | --- | -------- |
//! | LED | PC13 | GPIO output |
//! | Button | PA0 | GPIO input |
//! | Motor PWM | PA8 | TIM1_CH1 (AF1) |
//! | Servo PWM | PA15 | TIM2_CH1 (AF1) |
//! | UART TX/RX | PA9 / PA10 | USART1 (AF7) |

use stm32f7xx_hal::{
    gpio::{gpioa, gpioc, Alternate, Floating, Input, Output, PushPull},
    pac,
    prelude::*,
};

use crate::hw::Pull;

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, config::BUTTON_PULL);
/// ```
pub struct BoardPins {
    pub led: gpioc::PC13<Output<PushPull>>,
    pub button: gpioa::PA0<Input<Floating>>,
    pub usart1: Usart1Pins,
    pub motor: gpioa::PA8<Alternate<1>>,
    pub servo: gpioa::PA15<Alternate<1>>,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, button_pull: Pull) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();

        let button = gpioa.pa0.into_floating_input();
        set_pa0_pull(button_pull);

        Self {
            led: gpioc.pc13.into_push_pull_output(),
            button,

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            motor: gpioa.pa8.into_alternate::<1>(),
            servo: gpioa.pa15.into_alternate::<1>(),
        }
    }
}

/// Program the PA0 bias. The pin type stays `Input<Floating>` so the pull can be chosen by
/// configuration rather than by type.
fn set_pa0_pull(pull: Pull) {
    let bits: u32 = match pull {
        Pull::None => 0b00,
        Pull::Up => 0b01,
        Pull::Down => 0b10,
    };
    let gpioa = unsafe { &*pac::GPIOA::ptr() };
    gpioa
        .pupdr
        .modify(|r, w| unsafe { w.bits((r.bits() & !0b11) | bits) });
}
