// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Actuator test sweep.
//!
//! Steps the motor duty cycle and the servo angle through a fixed schedule, holding each step for
//! a dwell time so the waveform can be checked on a scope.

use embedded_hal::delay::DelayNs;

use crate::hw::{PwmChannel, PwmTimer, Servo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepStep {
    pub motor_duty: u8,
    pub servo_angle: u8,
}

const fn step(motor_duty: u8, servo_angle: u8) -> SweepStep {
    SweepStep {
        motor_duty,
        servo_angle,
    }
}

pub const SCHEDULE: [SweepStep; 6] = [
    step(0, 0),
    step(25, 45),
    step(50, 90),
    step(75, 135),
    step(100, 180),
    step(0, 90),
];

/// Run [`SCHEDULE`] once, blocking for `dwell_ms` on every step.
pub fn run<M, S, D>(motor: &mut PwmChannel<M>, servo: &mut Servo<S>, delay: &mut D, dwell_ms: u32)
where
    M: PwmTimer,
    S: PwmTimer,
    D: DelayNs,
{
    for s in SCHEDULE {
        motor.set_duty_cycle(s.motor_duty);
        servo.set_angle(s.servo_angle);
        crate::log_debug!(
            "sweep: duty {=u8}% angle {=u8} deg",
            s.motor_duty,
            s.servo_angle
        );
        delay.delay_ms(dwell_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::timer::tests::MockTimer;
    use crate::hw::{PulseRange, PwmTiming};
    use crate::testing::SimDelay;

    #[test]
    fn walks_the_schedule_with_dwell() {
        let motor_timing = PwmTiming::derive::<MockTimer>(1_000, 1_000_000, 16_000_000).unwrap();
        let servo_timing = PwmTiming::derive::<MockTimer>(50, 1_000_000, 16_000_000).unwrap();
        let mut motor = PwmChannel::configure(MockTimer::default(), motor_timing);
        let mut servo = Servo::new(
            PwmChannel::configure(MockTimer::default(), servo_timing),
            PulseRange {
                min_us: 544,
                max_us: 2_400,
            },
        )
        .unwrap();
        let mut delay = SimDelay::new();

        run(&mut motor, &mut servo, &mut delay, 500);

        assert_eq!(delay.calls, [500; SCHEDULE.len()]);
        assert_eq!(motor.free().writes, [0, 250, 500, 750, 1_000, 0]);
        assert_eq!(servo.angle(), Some(90));
        assert_eq!(
            servo.free().free().writes,
            [544, 1_008, 1_472, 1_936, 2_400, 1_472]
        );
    }
}
