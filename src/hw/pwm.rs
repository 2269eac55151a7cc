// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Timer-driven PWM channel and hobby-servo wrapper.
//!
//! Timer frequency = timer_clock / (PSC + 1) / (ARR + 1). The prescaler brings the timer clock down
//! to a tick rate chosen for resolution (1 MHz gives 1 us steps), and the period counts ticks per
//! PWM cycle. All compare math is integer.
//!
//! Setters saturate instead of failing: a duty above 100 % is 100 %, an angle above 180° is 180°.
//! Compare writes go through the preload register, so a new value starts at the next period.

use crate::hw::timer::PwmTimer;

const US_PER_S: u64 = 1_000_000;

pub const MAX_DUTY_PERCENT: u8 = 100;
pub const MAX_ANGLE_DEG: u8 = 180;

/// Reasons a PWM timing cannot be realised on a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// Frequency or tick rate is zero.
    Zero,
    /// Tick rate is faster than the timer clock.
    TickAboveClock,
    /// Timer clock is not a whole multiple of the tick rate.
    UnevenTick,
    /// PWM frequency is faster than the tick rate.
    FrequencyAboveTick,
    /// Prescaler does not fit the PSC register.
    PrescalerRange,
    /// Period does not fit the ARR register.
    PeriodRange,
    /// Servo pulse bounds are inverted or longer than the PWM period.
    PulseRange,
}

/// Prescaler/period pair derived for one timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    pub frequency_hz: u32,
    pub tick_hz: u32,
    pub prescaler: u32,
    pub period: u32,
}

impl PwmTiming {
    /// Derive PSC and ARR for `frequency_hz` using a `tick_hz` counter clock.
    ///
    /// `prescaler = timer_clock_hz / tick_hz - 1`, `period = tick_hz / frequency_hz - 1`.
    pub fn derive<T: PwmTimer>(
        frequency_hz: u32,
        tick_hz: u32,
        timer_clock_hz: u32,
    ) -> Result<Self, TimingError> {
        if frequency_hz == 0 || tick_hz == 0 {
            return Err(TimingError::Zero);
        }
        if tick_hz > timer_clock_hz {
            return Err(TimingError::TickAboveClock);
        }
        if timer_clock_hz % tick_hz != 0 {
            return Err(TimingError::UnevenTick);
        }
        if frequency_hz > tick_hz {
            return Err(TimingError::FrequencyAboveTick);
        }

        let prescaler = timer_clock_hz / tick_hz - 1;
        let period = tick_hz / frequency_hz - 1;

        if prescaler > T::MAX_PRESCALER {
            return Err(TimingError::PrescalerRange);
        }
        if period > T::MAX_PERIOD {
            return Err(TimingError::PeriodRange);
        }

        Ok(Self {
            frequency_hz,
            tick_hz,
            prescaler,
            period,
        })
    }

    /// Ticks in one full PWM cycle (ARR + 1).
    #[inline]
    pub fn ticks_per_cycle(&self) -> u32 {
        self.period + 1
    }

    /// Convert a pulse width in microseconds to counter ticks. `None` if the result does not fit
    /// a 32-bit register.
    #[inline]
    pub fn ticks_for_us(&self, us: u32) -> Option<u32> {
        u32::try_from(u64::from(us) * u64::from(self.tick_hz) / US_PER_S).ok()
    }
}

/// One PWM output: a timer channel plus its timing.
pub struct PwmChannel<T: PwmTimer> {
    timer: T,
    timing: PwmTiming,
}

impl<T: PwmTimer> PwmChannel<T> {
    /// Program the timer and start the waveform at 50 % duty.
    pub fn configure(mut timer: T, timing: PwmTiming) -> Self {
        timer.program(timing.prescaler, timing.period, timing.period / 2);
        timer.enable_pwm_output();
        timer.start();
        Self { timer, timing }
    }

    /// Compare value for `percent`, saturated at 100 %.
    pub fn compare_for_duty(&self, percent: u8) -> u32 {
        let percent = percent.min(MAX_DUTY_PERCENT);
        (u64::from(self.timing.ticks_per_cycle()) * u64::from(percent)
            / u64::from(MAX_DUTY_PERCENT)) as u32
    }

    /// Set duty cycle in percent. Values above 100 are treated as 100.
    pub fn set_duty_cycle(&mut self, percent: u8) {
        let compare = self.compare_for_duty(percent);
        self.timer.set_compare(compare);
    }

    /// Set the high time directly in counter ticks, saturated at a full cycle.
    pub fn set_pulse_ticks(&mut self, ticks: u32) {
        self.timer
            .set_compare(ticks.min(self.timing.ticks_per_cycle()));
    }

    /// Current duty cycle in whole percent, rounded down.
    pub fn duty_cycle(&self) -> u8 {
        let percent = u64::from(self.compare()) * u64::from(MAX_DUTY_PERCENT)
            / u64::from(self.timing.ticks_per_cycle());
        percent as u8
    }

    /// Compare value last written to the timer.
    #[inline]
    pub fn compare(&self) -> u32 {
        self.timer.compare()
    }

    #[inline]
    pub fn period(&self) -> u32 {
        self.timing.period
    }

    #[inline]
    pub fn prescaler(&self) -> u32 {
        self.timing.prescaler
    }

    #[inline]
    pub fn timing(&self) -> &PwmTiming {
        &self.timing
    }

    pub fn free(self) -> T {
        self.timer
    }
}

/// Servo pulse width bounds, microseconds, for 0° and 180°.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseRange {
    pub min_us: u32,
    pub max_us: u32,
}

/// Hobby servo on a 50 Hz PWM channel.
///
/// Angle maps linearly onto the pulse range:
/// `pulse = min + (max - min) * angle / 180`, so the pulse never leaves `[min, max]`.
pub struct Servo<T: PwmTimer> {
    channel: PwmChannel<T>,
    min_ticks: u32,
    max_ticks: u32,
    angle: Option<u8>,
}

impl<T: PwmTimer> Servo<T> {
    /// Wrap a configured channel. The output is left where `configure` put it until the first
    /// `set_angle`.
    pub fn new(channel: PwmChannel<T>, range: PulseRange) -> Result<Self, TimingError> {
        let timing = channel.timing();
        let (Some(min_ticks), Some(max_ticks)) = (
            timing.ticks_for_us(range.min_us),
            timing.ticks_for_us(range.max_us),
        ) else {
            return Err(TimingError::PulseRange);
        };
        if min_ticks > max_ticks || max_ticks > timing.ticks_per_cycle() {
            return Err(TimingError::PulseRange);
        }
        Ok(Self {
            channel,
            min_ticks,
            max_ticks,
            angle: None,
        })
    }

    /// Pulse width in ticks for `degrees`, saturated at 180°.
    pub fn pulse_ticks_for(&self, degrees: u8) -> u32 {
        let degrees = u64::from(degrees.min(MAX_ANGLE_DEG));
        let span = u64::from(self.max_ticks - self.min_ticks);
        // span * degrees / 180 <= span, so the sum stays within max_ticks.
        self.min_ticks + (span * degrees / u64::from(MAX_ANGLE_DEG)) as u32
    }

    /// Move to `degrees`. Values above 180 are treated as 180.
    pub fn set_angle(&mut self, degrees: u8) {
        let degrees = degrees.min(MAX_ANGLE_DEG);
        let ticks = self.pulse_ticks_for(degrees);
        self.channel.set_pulse_ticks(ticks);
        self.angle = Some(degrees);
    }

    /// Raw duty cycle, bypassing the angle mapping.
    pub fn set_duty_cycle(&mut self, percent: u8) {
        self.channel.set_duty_cycle(percent);
        self.angle = None;
    }

    /// Last commanded angle, `None` if the output was last set by duty cycle.
    #[inline]
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }

    #[inline]
    pub fn pulse_ticks(&self) -> u32 {
        self.channel.compare()
    }

    #[inline]
    pub fn pulse_bounds(&self) -> (u32, u32) {
        (self.min_ticks, self.max_ticks)
    }

    pub fn channel(&self) -> &PwmChannel<T> {
        &self.channel
    }

    pub fn free(self) -> PwmChannel<T> {
        self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::hw::timer::tests::MockTimer;

    fn motor() -> PwmChannel<MockTimer> {
        let timing = PwmTiming::derive::<MockTimer>(
            config::MOTOR_PWM_HZ,
            config::MOTOR_TICK_HZ,
            config::SYSCLK_HZ,
        )
        .unwrap();
        PwmChannel::configure(MockTimer::default(), timing)
    }

    fn servo() -> Servo<MockTimer> {
        let timing = PwmTiming::derive::<MockTimer>(
            config::SERVO_PWM_HZ,
            config::SERVO_TICK_HZ,
            config::SYSCLK_HZ,
        )
        .unwrap();
        let range = PulseRange {
            min_us: config::SERVO_MIN_PULSE_US,
            max_us: config::SERVO_MAX_PULSE_US,
        };
        Servo::new(PwmChannel::configure(MockTimer::default(), timing), range).unwrap()
    }

    #[test]
    fn motor_timing_from_16mhz() {
        let pwm = motor();
        assert_eq!(pwm.prescaler(), 15);
        assert_eq!(pwm.period(), 999);
    }

    #[test]
    fn servo_timing_from_16mhz() {
        let servo = servo();
        assert_eq!(servo.channel().prescaler(), 15);
        assert_eq!(servo.channel().period(), 19_999);
    }

    #[test]
    fn configure_programs_and_starts_at_half_duty() {
        let timer = motor().free();
        assert_eq!(timer.psc, 15);
        assert_eq!(timer.arr, 999);
        assert_eq!(timer.ccr, 499);
        assert_eq!(timer.active_ccr, 499);
        assert!(timer.pwm_mode && timer.preload && timer.output_enabled);
        assert!(timer.main_output);
        assert!(timer.running);
    }

    #[test]
    fn duty_cycle_compare_formula() {
        let mut pwm = motor();
        for d in 0..=100u8 {
            pwm.set_duty_cycle(d);
            assert_eq!(pwm.compare(), u32::from(d) * 1_000 / 100);
            assert_eq!(pwm.duty_cycle(), d);
        }
    }

    #[test]
    fn duty_above_100_saturates() {
        let mut pwm = motor();
        pwm.set_duty_cycle(100);
        let full = pwm.compare();
        for d in [101u8, 150, 255] {
            pwm.set_duty_cycle(d);
            assert_eq!(pwm.compare(), full);
        }
        assert_eq!(full, 1_000);
    }

    #[test]
    fn compare_change_waits_for_update_event() {
        let mut pwm = motor();
        pwm.set_duty_cycle(25);
        let mut timer = pwm.free();
        assert_eq!(timer.ccr, 250);
        assert_eq!(timer.active_ccr, 499);
        timer.update_event();
        assert_eq!(timer.active_ccr, 250);
    }

    #[test]
    fn angle_bounds_match_reference_scaling() {
        let mut servo = servo();
        servo.set_angle(0);
        assert_eq!(servo.pulse_ticks(), 544);
        servo.set_angle(180);
        assert_eq!(servo.pulse_ticks(), 2_400);
        // 544 + 10.312 * 90 = 1472.08
        servo.set_angle(90);
        assert_eq!(servo.pulse_ticks(), 1_472);
    }

    #[test]
    fn angle_map_is_monotonic_and_bounded() {
        let servo = servo();
        let (min, max) = servo.pulse_bounds();
        let mut last = 0;
        for a in 0..=180u8 {
            let p = servo.pulse_ticks_for(a);
            assert!(p >= last);
            assert!((min..=max).contains(&p));
            last = p;
        }
    }

    #[test]
    fn angle_above_180_saturates() {
        let mut servo = servo();
        servo.set_angle(180);
        let full = servo.pulse_ticks();
        servo.set_angle(200);
        assert_eq!(servo.pulse_ticks(), full);
        assert_eq!(servo.angle(), Some(180));
    }

    #[test]
    fn servo_duty_path_clears_angle() {
        let mut servo = servo();
        servo.set_angle(45);
        servo.set_duty_cycle(80);
        assert_eq!(servo.angle(), None);
        assert_eq!(servo.pulse_ticks(), 16_000);
    }

    #[test]
    fn millisecond_tick_gives_coarse_servo_period() {
        let timing = PwmTiming::derive::<MockTimer>(50, 1_000, 16_000_000).unwrap();
        assert_eq!(timing.prescaler, 15_999);
        assert_eq!(timing.period, 19);
    }

    #[test]
    fn rejects_unrealisable_timing() {
        assert_eq!(
            PwmTiming::derive::<MockTimer>(0, 1_000_000, 16_000_000),
            Err(TimingError::Zero)
        );
        assert_eq!(
            PwmTiming::derive::<MockTimer>(1_000, 32_000_000, 16_000_000),
            Err(TimingError::TickAboveClock)
        );
        assert_eq!(
            PwmTiming::derive::<MockTimer>(1_000, 3_000_000, 16_000_000),
            Err(TimingError::UnevenTick)
        );
        assert_eq!(
            PwmTiming::derive::<MockTimer>(2_000_000, 1_000_000, 16_000_000),
            Err(TimingError::FrequencyAboveTick)
        );
        // 16 MHz tick at 50 Hz needs ARR = 319_999, beyond a 16-bit timer.
        assert_eq!(
            PwmTiming::derive::<MockTimer>(50, 16_000_000, 16_000_000),
            Err(TimingError::PeriodRange)
        );
        assert_eq!(
            PwmTiming::derive::<MockTimer>(1, 100, 16_000_000),
            Err(TimingError::PrescalerRange)
        );
    }

    /// 1 s period at a 100 MHz tick, as a 32-bit timer can hold.
    fn wide_timing() -> PwmTiming {
        PwmTiming {
            frequency_hz: 1,
            tick_hz: 100_000_000,
            prescaler: 0,
            period: 99_999_999,
        }
    }

    #[test]
    fn wide_pulse_span_maps_without_overflow() {
        let range = PulseRange {
            min_us: 0,
            max_us: 500_000,
        };
        let mut servo =
            Servo::new(PwmChannel::configure(MockTimer::default(), wide_timing()), range).unwrap();
        assert_eq!(servo.pulse_ticks_for(90), 25_000_000);
        assert_eq!(servo.pulse_ticks_for(180), 50_000_000);
        servo.set_angle(135);
        assert_eq!(servo.pulse_ticks(), 37_500_000);
    }

    #[test]
    fn pulse_width_beyond_register_is_rejected() {
        // 42.95 s at 100 MHz is just over u32::MAX ticks; truncated it would look like 32_704.
        assert_eq!(wide_timing().ticks_for_us(42_950_000), None);
        let range = PulseRange {
            min_us: 0,
            max_us: 42_950_000,
        };
        assert!(matches!(
            Servo::new(PwmChannel::configure(MockTimer::default(), wide_timing()), range),
            Err(TimingError::PulseRange)
        ));
    }

    #[test]
    fn rejects_inverted_or_oversized_pulse_range() {
        let timing = PwmTiming::derive::<MockTimer>(50, 1_000_000, 16_000_000).unwrap();
        let inverted = PulseRange {
            min_us: 2_000,
            max_us: 1_000,
        };
        assert!(matches!(
            Servo::new(PwmChannel::configure(MockTimer::default(), timing), inverted),
            Err(TimingError::PulseRange)
        ));
        let too_long = PulseRange {
            min_us: 1_000,
            max_us: 30_000,
        };
        assert!(matches!(
            Servo::new(PwmChannel::configure(MockTimer::default(), timing), too_long),
            Err(TimingError::PulseRange)
        ));
    }
}
