//! Fixed-layout status screen text.
//!
//! ```text
//! y=0   BLE: Connected
//! y=10  Accel: 9.81
//! y=20  Gyro: 0.02
//! y=30  Temp: 24.50
//! y=40  Lock Status: Unlocked
//! ```

use core::fmt::Write;

use heapless::String;

use crate::guard::GuardState;

/// Number of text rows on the status screen.
pub const STATUS_ROWS: usize = 5;

/// Vertical distance between rows (pixels, 6×10 font).
pub const ROW_HEIGHT: i32 = 10;

/// Capacity of one row; 128 px / 6 px glyphs = 21 visible columns.
pub const ROW_CAPACITY: usize = 32;

pub type StatusLine = String<ROW_CAPACITY>;

/// Render the five status rows for `state`.
///
/// Values are printed with two decimals; anything too wide for a row is
/// cut off rather than wrapped.
pub fn status_lines(state: &GuardState) -> [StatusLine; STATUS_ROWS] {
    let sample = state.sample();
    let ble = if state.is_connected() {
        "Connected"
    } else {
        "Disconnected"
    };
    let lock = if state.is_locked() { "Locked" } else { "Unlocked" };

    let mut lines: [StatusLine; STATUS_ROWS] = Default::default();
    let _ = write!(lines[0], "BLE: {}", ble);
    let _ = write!(lines[1], "Accel: {:.2}", sample.accel_magnitude);
    let _ = write!(lines[2], "Gyro: {:.2}", sample.gyro_magnitude);
    let _ = write!(lines[3], "Temp: {:.2}", sample.temperature);
    let _ = write!(lines[4], "Lock Status: {}", lock);
    lines
}
