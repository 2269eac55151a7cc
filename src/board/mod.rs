// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # STM32F7 Bindings
//!
//! Chip-specific implementations of the `hw` seams, plus [`Board::init`], which brings up clocks,
//! pins and peripherals and hands back ready-to-use drivers.

pub mod delay;
pub mod gpio;
pub mod pins;
pub mod serial;
pub mod timers;

pub use delay::Tim3Delay;
pub use gpio::{InputLine, OutputLine};
pub use pins::BoardPins;
pub use serial::Usart;
pub use timers::{Tim1Ch1, Tim2Ch1};

use stm32f7xx_hal::{
    gpio::Floating,
    pac,
    prelude::*,
    serial::{Config, Serial},
};

use crate::config;
use crate::hw::{
    DebouncedButton, Led, LineChannel, PulseRange, PwmChannel, PwmTiming, Servo, TimingError,
};

pub type LedLine = OutputLine<'C', 13>;
pub type ButtonLine = InputLine<'A', 0, Floating>;
pub type Link = LineChannel<Usart<pac::USART1>, { config::RESPONSE_CAPACITY }>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// Device peripherals were already taken.
    PeripheralsTaken,
    /// Configured PWM timing does not fit the timers at this clock.
    Timing(TimingError),
}

impl From<TimingError> for BoardError {
    fn from(e: TimingError) -> Self {
        BoardError::Timing(e)
    }
}

pub struct Board {
    pub led: Led<LedLine>,
    pub button: DebouncedButton<ButtonLine>,
    pub link: Link,
    pub motor: PwmChannel<Tim1Ch1>,
    pub servo: Servo<Tim2Ch1>,
    pub delay: Tim3Delay,
    /// Timer kernel clock the PWM timing was derived from.
    pub timer_clock_hz: u32,
}

impl Board {
    /// Take the device peripherals and bring the board up.
    pub fn init() -> Result<Self, BoardError> {
        let dp = pac::Peripherals::take().ok_or(BoardError::PeripheralsTaken)?;

        // Clocks
        let rcc = dp.RCC.constrain();
        let clocks = rcc.cfgr.freeze();
        let timer_clock_hz = clocks.sysclk().raw();

        // GPIO
        let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, config::BUTTON_PULL);

        let led = Led::new(OutputLine::new(pins.led), config::LED_ACTIVE);
        let button = DebouncedButton::new(
            InputLine::new(pins.button),
            config::BUTTON_ACTIVE,
            config::DEBOUNCE_SETTLE_MS,
        );

        // USART1
        let usart_cfg = Config {
            baud_rate: config::UART_BAUD.bps(),
            ..Default::default()
        };
        let serial = Serial::new(
            dp.USART1,
            (pins.usart1.tx, pins.usart1.rx),
            &clocks,
            usart_cfg,
        );
        let link = LineChannel::new(Usart::new(serial));

        // PWM
        let motor_timing = PwmTiming::derive::<Tim1Ch1>(
            config::MOTOR_PWM_HZ,
            config::MOTOR_TICK_HZ,
            timer_clock_hz,
        )?;
        let motor = PwmChannel::configure(Tim1Ch1::new(dp.TIM1, pins.motor), motor_timing);

        let servo_timing = PwmTiming::derive::<Tim2Ch1>(
            config::SERVO_PWM_HZ,
            config::SERVO_TICK_HZ,
            timer_clock_hz,
        )?;
        let servo = Servo::new(
            PwmChannel::configure(Tim2Ch1::new(dp.TIM2, pins.servo), servo_timing),
            PulseRange {
                min_us: config::SERVO_MIN_PULSE_US,
                max_us: config::SERVO_MAX_PULSE_US,
            },
        )?;

        // Delay
        let delay = Tim3Delay::new(dp.TIM3, timer_clock_hz);

        Ok(Self {
            led,
            button,
            link,
            motor,
            servo,
            delay,
            timer_clock_hz,
        })
    }
}
