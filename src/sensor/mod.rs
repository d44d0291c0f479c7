//! Motion sensor acquisition.
//!
//! - [`mpu6050`]: InvenSense MPU-6050 accelerometer + gyro over I²C

pub mod mpu6050;
