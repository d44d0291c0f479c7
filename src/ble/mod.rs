//! Bluetooth Low Energy subsystem.
//!
//! Two independent roles, one per binary:
//!
//! 1. **Scanner** (central) - continuously scans, decodes each
//!    advertisement and logs a human-readable report.
//! 2. **Guard server** (peripheral) - advertises the guard service,
//!    notifies sensor frames and forwards connection changes and command
//!    writes to the main loop through an event channel.
//!
//! Parsing and report formatting are pure and run on the host;
//! everything touching the SoftDevice is behind the `embedded` feature.

pub mod adv_parser;
pub mod report;

#[cfg(feature = "embedded")]
pub mod scanner;
#[cfg(feature = "embedded")]
pub mod server;

/// Drives the SoftDevice event loop; spawned once by each binary.
#[cfg(feature = "embedded")]
#[embassy_executor::task]
pub async fn softdevice_task(sd: &'static nrf_softdevice::Softdevice) -> ! {
    sd.run().await
}
