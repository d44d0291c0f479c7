//! Motion sample and derived magnitudes.

/// Three-axis reading.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm.
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// One raw acquisition from the motion sensor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionReading {
    /// Acceleration (m/s²).
    pub accel: Vector3,
    /// Angular rate (rad/s).
    pub gyro: Vector3,
    /// Die temperature (°C).
    pub temperature: f32,
}

/// Current per-tick sample; replaces the previous one, no history.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSample {
    pub accel_magnitude: f32,
    pub gyro_magnitude: f32,
    pub temperature: f32,
}

impl From<MotionReading> for SensorSample {
    fn from(reading: MotionReading) -> Self {
        Self {
            accel_magnitude: reading.accel.magnitude(),
            gyro_magnitude: reading.gyro.magnitude(),
            temperature: reading.temperature,
        }
    }
}
