//! User interface subsystem - the guard's status screen.
//!
//! ## Components
//!
//! - **Status**: pure text layout of the five status rows (host-testable)
//! - **Display**: SSD1306 128×64 OLED via I²C, renders those rows

pub mod status;

#[cfg(feature = "embedded")]
pub mod display;
