//! ble-guard - nRF52840 firmware library.
//!
//! Shared by the two binaries:
//!
//! - `sniffer`: passive BLE advertisement logger.
//! - `guard`: MPU-6050 motion/temperature guard with an OLED status
//!   screen, a BLE lock service and a buzzer alarm.
//!
//! The pure logic (advertisement parsing, report text, guard state
//! machine, frame codec, status text, MPU-6050 register handling) builds
//! and tests on the host.  Modules that touch the SoftDevice, PWM or the
//! display are compiled only with the `embedded` feature.
//!
//! Usage: `cargo test --lib` (host), `cargo run --release --bin guard
//! --features embedded --target thumbv7em-none-eabihf` (device).

#![cfg_attr(not(test), no_std)]

pub mod ble;
pub mod config;
pub mod error;
pub mod guard;
pub mod sensor;
pub mod ui;

#[cfg(feature = "embedded")]
pub mod buzzer;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
