//! Piezo buzzer on a PWM channel.
//!
//! A pulse is: start a square wave at `BUZZER_TONE_HZ`, hold it for
//! `ALARM_PULSE_MS`, silence.  The caller awaits the whole pulse, so the
//! guard loop does nothing else meanwhile.

use crate::config::{ALARM_PULSE_MS, BUZZER_TONE_HZ};
use crate::guard::AlarmCause;
use defmt::info;
use embassy_nrf::pwm::{Instance, Prescaler, SimplePwm};
use embassy_time::{Duration, Timer};

/// PWM counter clock after `Prescaler::Div16` (16 MHz / 16).
const PWM_CLOCK_HZ: u32 = 1_000_000;

pub struct Buzzer<'d, T: Instance> {
    pwm: SimplePwm<'d, T>,
}

impl<'d, T: Instance> Buzzer<'d, T> {
    /// Take a single-channel PWM and make sure it starts silent.
    pub fn new(mut pwm: SimplePwm<'d, T>) -> Self {
        pwm.set_prescaler(Prescaler::Div16);
        pwm.set_max_duty((PWM_CLOCK_HZ / BUZZER_TONE_HZ) as u16);
        pwm.disable();
        Self { pwm }
    }

    /// Sound one blocking alarm pulse.
    pub async fn pulse(&mut self, cause: AlarmCause) {
        info!("Buzzer: {}", cause);
        self.tone();
        Timer::after(Duration::from_millis(ALARM_PULSE_MS)).await;
        self.silence();
    }

    fn tone(&mut self) {
        let half = self.pwm.max_duty() / 2;
        self.pwm.enable();
        self.pwm.set_duty(0, half);
    }

    fn silence(&mut self) {
        self.pwm.disable();
    }
}
