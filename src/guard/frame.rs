//! Sensor characteristic wire format.
//!
//! Layout (12 bytes):
//! ```text
//! Bytes 0-1:  acceleration magnitude (i16 LE, truncated toward zero)
//! Bytes 2-3:  gyro magnitude         (i16 LE, truncated toward zero)
//! Bytes 4-5:  temperature            (i16 LE, truncated toward zero)
//! Bytes 6-11: zero padding
//! ```

use super::sample::SensorSample;

/// Sensor frame size in bytes.
pub const SENSOR_FRAME_SIZE: usize = 12;

/// Truncated integer view of a `SensorSample`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorFrame {
    pub accel: i16,
    pub gyro: i16,
    pub temperature: i16,
}

impl SensorFrame {
    /// Truncate each value toward zero; out-of-range values saturate and
    /// NaN becomes 0 (Rust `as` semantics).
    pub fn from_sample(sample: &SensorSample) -> Self {
        Self {
            accel: sample.accel_magnitude as i16,
            gyro: sample.gyro_magnitude as i16,
            temperature: sample.temperature as i16,
        }
    }

    /// Encode into the notification payload.
    pub fn encode(&self) -> [u8; SENSOR_FRAME_SIZE] {
        let mut buf = [0u8; SENSOR_FRAME_SIZE];
        buf[0..2].copy_from_slice(&self.accel.to_le_bytes());
        buf[2..4].copy_from_slice(&self.gyro.to_le_bytes());
        buf[4..6].copy_from_slice(&self.temperature.to_le_bytes());
        buf
    }

    /// Decode a notification payload; `None` if shorter than the three values.
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < 6 {
            return None;
        }
        Some(Self {
            accel: i16::from_le_bytes([data[0], data[1]]),
            gyro: i16::from_le_bytes([data[2], data[3]]),
            temperature: i16::from_le_bytes([data[4], data[5]]),
        })
    }
}
