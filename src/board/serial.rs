// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART adapter exposing the HAL serial halves through `embedded-hal-nb` 1.0.

use embedded_hal_nb::serial::{ErrorKind, ErrorType, Read, Write};
use stm32f7xx_hal::{
    prelude::*,
    serial::{self, Instance, Pins, Rx, Serial, Tx},
};

pub struct Usart<U: Instance> {
    tx: Tx<U>,
    rx: Rx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, rx) = serial.split();
        Self { tx, rx }
    }
}

fn error_kind(e: serial::Error) -> ErrorKind {
    match e {
        serial::Error::Overrun => ErrorKind::Overrun,
        serial::Error::Framing => ErrorKind::FrameFormat,
        serial::Error::Noise => ErrorKind::Noise,
        serial::Error::Parity => ErrorKind::Parity,
        #[allow(unreachable_patterns)]
        _ => ErrorKind::Other,
    }
}

impl<U: Instance> ErrorType for Usart<U> {
    type Error = ErrorKind;
}

impl<U: Instance> Read<u8> for Usart<U> {
    #[inline]
    fn read(&mut self) -> nb::Result<u8, ErrorKind> {
        self.rx.read().map_err(|e| e.map(error_kind))
    }
}

impl<U: Instance> Write<u8> for Usart<U> {
    #[inline]
    fn write(&mut self, word: u8) -> nb::Result<(), ErrorKind> {
        self.tx.write(word).map_err(|e| e.map(|_| ErrorKind::Other))
    }

    #[inline]
    fn flush(&mut self) -> nb::Result<(), ErrorKind> {
        self.tx.flush().map_err(|e| e.map(|_| ErrorKind::Other))
    }
}
