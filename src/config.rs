//! Application-wide constants and compile-time configuration.
//!
//! All hardware addresses, timing parameters, alarm thresholds and BLE
//! identifiers live here so they can be tuned in one place.  There is no
//! runtime configuration: no CLI, no config file, nothing persisted.

use crate::ble::adv_parser::UuidScan;

// BLE - sniffer

/// GAP device name used by the sniffer.
pub const SNIFFER_DEVICE_NAME: &str = "BLE_SNIFFER";

/// Request scan responses so names carried only there are reported too.
pub const SCAN_ACTIVE: bool = true;

/// How the sniffer infers 16-bit service UUIDs from a raw payload.
///
/// `UuidScan::LegacyByteScan` reproduces the old byte-wise heuristic
/// bit for bit; `UuidScan::AdStructure` walks the AD structures.
pub const SERVICE_UUID_SCAN: UuidScan = UuidScan::AdStructure;

// BLE - guard peripheral

/// GAP device name advertised by the guard.
pub const GUARD_DEVICE_NAME: &str = "Secure_Guard_BLE";

/// Guard service UUID `6e400001-b5a3-f393-e0a9-e50e224dcca9`, in the
/// little-endian byte order used on air.
pub const GUARD_SERVICE_UUID_LE: [u8; 16] = [
    0xa9, 0xdc, 0x4d, 0x22, 0x0e, 0xe5, 0xa9, 0xe0, 0x93, 0xf3, 0xa3, 0xb5, 0x01, 0x00, 0x40, 0x6e,
];

/// Value the command characteristic holds before any central writes it.
pub const COMMAND_INITIAL_VALUE: &[u8] = b"Unlock";

/// Maximum accepted length of a command characteristic write.
pub const COMMAND_MAX_LEN: usize = 20;

/// Depth of the BLE → main loop event queue.
pub const EVENT_QUEUE_DEPTH: usize = 8;

// I²C peripherals
//
// Logical pin map (nRF52840-DK defaults, adjust for your board):
//
//   Display SDA  → P0.26    Display SCL → P0.27   (TWIM0)
//   MPU-6050 SDA → P0.30    MPU-6050 SCL → P0.31  (TWIM1)
//   Buzzer       → P0.03                          (PWM0)

/// SSD1306 OLED I²C address.
pub const DISPLAY_I2C_ADDRESS: u8 = 0x3C;

/// MPU-6050 I²C address (AD0 low).
pub const MPU6050_I2C_ADDRESS: u8 = 0x68;

/// Pause after clearing the display at start-up (ms).
pub const DISPLAY_STARTUP_PAUSE_MS: u64 = 500;

// Alarm

/// Buzzer tone: F4 (349.23 Hz), rounded.
pub const BUZZER_TONE_HZ: u32 = 349;

/// Length of one alarm pulse (ms).  The main loop is blocked for this long.
pub const ALARM_PULSE_MS: u64 = 1000;

/// Tamper alert when locked and |acceleration magnitude| exceeds this (m/s²).
pub const TAMPER_ACCEL_THRESHOLD: f32 = 2.0;

/// Tamper alert when locked and |gyro magnitude| exceeds this (rad/s).
pub const TAMPER_GYRO_THRESHOLD: f32 = 1.0;

/// Over-temperature alert above this (°C), regardless of lock state.
pub const OVER_TEMPERATURE_C: f32 = 35.0;

// Main loop

/// Pause between guard ticks (ms); gives the BLE tasks a chance to run.
pub const GUARD_TICK_MS: u64 = 100;
