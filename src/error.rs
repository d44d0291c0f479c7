//! Unified error type for ble-guard.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Only start-up failures travel through these types; once the guard
//! loop runs, bad input is tolerated silently instead.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // BLE
    /// The SoftDevice returned a BLE-level error.
    Ble(BleError),

    // Display
    /// The SSD1306 did not answer at its I²C address.
    Display,

    // Motion sensor
    /// The MPU-6050 could not be found or configured.
    MotionSensor(SensorError),
}

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// Scan was cancelled or could not start.
    ScanFailed,
    /// Connectable advertising could not start.
    AdvertiseFailed,
    /// The GATT server could not be registered.
    ServerFailed,
}

/// MPU-6050 failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// I²C transaction failed (NAK, bus error).
    Bus,
    /// WHO_AM_I returned something other than an MPU-6050.
    UnexpectedId(u8),
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Error::MotionSensor(e)
    }
}

/// Stop for good after a start-up failure: log it, then idle until
/// someone power-cycles the board.
#[cfg(feature = "embedded")]
pub fn halt(error: Error) -> ! {
    defmt::error!("Fatal: {}", error);
    loop {
        cortex_m::asm::wfe();
    }
}
