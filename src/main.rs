// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use defmt_rtt as _;
use embedded_hal::delay::DelayNs;
use panic_halt as _;

use peerlink::{
    board::Board,
    config::{self, Role},
    control::{dispatch, sweep, LinkFault, Requester, Responder},
    log_info, log_warn,
};

#[entry]
fn main() -> ! {
    let board = match Board::init() {
        Ok(board) => board,
        Err(e) => {
            defmt::error!("board init failed: {}", e);
            halt();
        }
    };

    let Board {
        led,
        mut button,
        link,
        mut motor,
        mut servo,
        mut delay,
        timer_clock_hz,
    } = board;

    log_info!(
        "peerlink up: role {}, timer clock {=u32} Hz, {=u32} baud",
        config::ROLE,
        timer_clock_hz,
        config::UART_BAUD
    );
    if timer_clock_hz != config::SYSCLK_HZ {
        log_warn!(
            "timer clock {=u32} Hz differs from configured {=u32} Hz",
            timer_clock_hz,
            config::SYSCLK_HZ
        );
    }
    log_info!(
        "motor PWM: psc {=u32} arr {=u32}; servo PWM: psc {=u32} arr {=u32}",
        motor.prescaler(),
        motor.period(),
        servo.channel().prescaler(),
        servo.channel().period()
    );

    if config::SWEEP_ON_BOOT && config::ROLE == Role::Requester {
        sweep::run(&mut motor, &mut servo, &mut delay, config::SWEEP_DWELL_MS);
        log_info!("sweep done");
    }

    match config::ROLE {
        Role::Requester => {
            let mut requester =
                Requester::new(link, led).with_timeout_ms(config::RESPONSE_TIMEOUT_MS);
            loop {
                dispatch::request_on_press(&mut button, &mut requester, &mut delay);
                delay.delay_ms(config::POLL_INTERVAL_MS);
            }
        }
        Role::Responder => {
            let mut responder = Responder::new(link, led);
            loop {
                match responder.serve_once() {
                    Ok(Some(cmd)) => log_info!("served {}, LED {}", cmd, responder.led_state()),
                    Ok(None) => log_warn!("ignored unknown request"),
                    Err(e) => log_warn!("link error: {}", LinkFault::from(e)),
                }
            }
        }
        Role::Standalone => {
            let mut led = led;
            drop(link);
            loop {
                dispatch::toggle_on_press(&mut button, &mut led, &mut delay);
                delay.delay_ms(config::POLL_INTERVAL_MS);
            }
        }
    }
}

fn halt() -> ! {
    loop {
        cortex_m::asm::nop();
    }
}
