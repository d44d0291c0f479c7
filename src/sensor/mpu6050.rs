//! MPU-6050 6-axis motion sensor driver (blocking I²C).
//!
//! Configured the way the guard expects its readings: ±2 g accelerometer,
//! ±500 °/s gyro, 260 Hz low-pass filter.  Every sample is one 14-byte
//! burst read starting at ACCEL_XOUT_H:
//!
//! ```text
//! AX_H AX_L AY_H AY_L AZ_H AZ_L  T_H T_L  GX_H GX_L GY_H GY_L GZ_H GZ_L
//! ```
//!
//! All words are big-endian two's complement.

use embedded_hal::i2c::I2c;

use crate::error::SensorError;
use crate::guard::sample::{MotionReading, Vector3};

/// Register addresses.
mod reg {
    pub const SMPLRT_DIV: u8 = 0x19;
    pub const CONFIG: u8 = 0x1A;
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const WHO_AM_I: u8 = 0x75;
}

/// Register values written at start-up.
mod setting {
    /// Wake up, clock from the X gyro PLL.
    pub const CLOCK_PLL_XGYRO: u8 = 0x01;
    /// DLPF 260 Hz (no filtering).
    pub const DLPF_260HZ: u8 = 0x00;
    /// FS_SEL = 1: ±500 °/s.
    pub const GYRO_500DPS: u8 = 0x08;
    /// AFS_SEL = 0: ±2 g.
    pub const ACCEL_2G: u8 = 0x00;
}

/// Expected WHO_AM_I value.
pub const DEVICE_ID: u8 = 0x68;

/// Burst length of one sample.
const SAMPLE_LEN: usize = 14;

const STANDARD_GRAVITY: f32 = 9.806_65;
/// LSB per g at ±2 g.
const ACCEL_LSB_PER_G: f32 = 16_384.0;
/// LSB per °/s at ±500 °/s.
const GYRO_LSB_PER_DPS: f32 = 65.5;
const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

/// MPU-6050 on an `embedded-hal` I²C bus.
pub struct Mpu6050<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C: I2c> Mpu6050<I2C> {
    /// Wrap the bus; nothing is sent until `init`.
    #[must_use]
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self { i2c, addr }
    }

    /// Check the chip id, wake it up and set ranges.
    pub fn init(&mut self) -> Result<(), SensorError> {
        let id = self.read_register(reg::WHO_AM_I)?;
        if id != DEVICE_ID {
            return Err(SensorError::UnexpectedId(id));
        }

        self.write_register(reg::PWR_MGMT_1, setting::CLOCK_PLL_XGYRO)?;
        self.write_register(reg::SMPLRT_DIV, 0)?;
        self.write_register(reg::CONFIG, setting::DLPF_260HZ)?;
        self.write_register(reg::GYRO_CONFIG, setting::GYRO_500DPS)?;
        self.write_register(reg::ACCEL_CONFIG, setting::ACCEL_2G)?;
        Ok(())
    }

    /// Read one acceleration / gyro / temperature sample.
    pub fn read(&mut self) -> Result<MotionReading, SensorError> {
        let mut buf = [0u8; SAMPLE_LEN];
        self.read_registers(reg::ACCEL_XOUT_H, &mut buf)?;
        Ok(convert(&buf))
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn read_register(&mut self, register: u8) -> Result<u8, SensorError> {
        let mut value = [0u8; 1];
        self.read_registers(register, &mut value)?;
        Ok(value[0])
    }

    fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), SensorError> {
        // Kept on the stack: TWIM EasyDMA cannot read from flash.
        let pointer = [start];
        self.i2c
            .write_read(self.addr, &pointer, buf)
            .map_err(|_| SensorError::Bus)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.addr, &[register, value])
            .map_err(|_| SensorError::Bus)
    }
}

fn word(buf: &[u8; SAMPLE_LEN], index: usize) -> f32 {
    i16::from_be_bytes([buf[index], buf[index + 1]]) as f32
}

/// Scale a raw burst into SI units.
fn convert(buf: &[u8; SAMPLE_LEN]) -> MotionReading {
    let accel = |i| word(buf, i) / ACCEL_LSB_PER_G * STANDARD_GRAVITY;
    let gyro = |i| word(buf, i) / GYRO_LSB_PER_DPS * DEG_TO_RAD;

    MotionReading {
        accel: Vector3::new(accel(0), accel(2), accel(4)),
        temperature: word(buf, 6) / 340.0 + 36.53,
        gyro: Vector3::new(gyro(8), gyro(10), gyro(12)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    /// Register-file fake: a write sets the pointer (and stores any
    /// following bytes), a read streams from the pointer.
    struct FakeBus {
        addr: u8,
        regs: [u8; 128],
        pointer: usize,
        fail_reads: bool,
    }

    impl FakeBus {
        fn new() -> Self {
            let mut regs = [0u8; 128];
            regs[reg::WHO_AM_I as usize] = DEVICE_ID;
            Self {
                addr: 0x68,
                regs,
                pointer: 0,
                fail_reads: false,
            }
        }

        fn load_sample(&mut self, words: [i16; 7]) {
            for (i, w) in words.iter().enumerate() {
                let at = reg::ACCEL_XOUT_H as usize + i * 2;
                self.regs[at..at + 2].copy_from_slice(&w.to_be_bytes());
            }
        }
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl I2c for FakeBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if address != self.addr {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        if let Some((&first, rest)) = bytes.split_first() {
                            self.pointer = first as usize;
                            for &b in rest {
                                self.regs[self.pointer] = b;
                                self.pointer += 1;
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        if self.fail_reads {
                            return Err(ErrorKind::Other);
                        }
                        for b in buf.iter_mut() {
                            *b = self.regs[self.pointer];
                            self.pointer += 1;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn init_configures_ranges_and_wakes() {
        let mut sensor = Mpu6050::new(FakeBus::new(), 0x68);
        sensor.init().unwrap();
        let bus = sensor.release();
        assert_eq!(bus.regs[reg::PWR_MGMT_1 as usize], 0x01);
        assert_eq!(bus.regs[reg::GYRO_CONFIG as usize], 0x08);
        assert_eq!(bus.regs[reg::ACCEL_CONFIG as usize], 0x00);
        assert_eq!(bus.regs[reg::CONFIG as usize], 0x00);
    }

    #[test]
    fn init_rejects_wrong_chip() {
        let mut bus = FakeBus::new();
        bus.regs[reg::WHO_AM_I as usize] = 0x70;
        let mut sensor = Mpu6050::new(bus, 0x68);
        assert_eq!(sensor.init(), Err(SensorError::UnexpectedId(0x70)));
    }

    #[test]
    fn init_fails_when_nothing_answers() {
        let mut sensor = Mpu6050::new(FakeBus::new(), 0x69);
        assert_eq!(sensor.init(), Err(SensorError::Bus));
    }

    #[test]
    fn read_converts_to_si_units() {
        let mut bus = FakeBus::new();
        // 1 g on Z, temp raw 0, 131 LSB (2 °/s) on gyro X.
        bus.load_sample([0, 0, 16_384, 0, 131, 0, 0]);
        let mut sensor = Mpu6050::new(bus, 0x68);
        let reading = sensor.read().unwrap();

        assert!(approx(reading.accel.z, 9.80665));
        assert!(approx(reading.accel.x, 0.0));
        assert!(approx(reading.temperature, 36.53));
        assert!(approx(reading.gyro.x, 2.0 * DEG_TO_RAD));
    }

    #[test]
    fn read_handles_negative_words() {
        let mut bus = FakeBus::new();
        bus.load_sample([-16_384, 0, 0, -340, 0, 0, 0]);
        let mut sensor = Mpu6050::new(bus, 0x68);
        let reading = sensor.read().unwrap();
        assert!(approx(reading.accel.x, -9.80665));
        assert!(approx(reading.temperature, 35.53));
    }

    #[test]
    fn read_reports_bus_errors() {
        let mut bus = FakeBus::new();
        bus.fail_reads = true;
        let mut sensor = Mpu6050::new(bus, 0x68);
        assert_eq!(sensor.read(), Err(SensorError::Bus));
    }
}
