//! Alarm thresholds.
//!
//! Instantaneous comparisons, strictly greater-than, no hysteresis: every
//! tick where a condition holds asks for another pulse.

use super::sample::SensorSample;
use crate::config::{OVER_TEMPERATURE_C, TAMPER_ACCEL_THRESHOLD, TAMPER_GYRO_THRESHOLD};

/// Motion large enough to count as tampering (only meaningful while locked).
pub fn tamper_detected(sample: &SensorSample) -> bool {
    libm::fabsf(sample.accel_magnitude) > TAMPER_ACCEL_THRESHOLD
        || libm::fabsf(sample.gyro_magnitude) > TAMPER_GYRO_THRESHOLD
}

pub fn over_temperature(sample: &SensorSample) -> bool {
    sample.temperature > OVER_TEMPERATURE_C
}
