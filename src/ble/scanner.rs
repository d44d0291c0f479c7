//! BLE GAP scanner - reports every advertisement it hears.
//!
//! Uses the SoftDevice Central-role scanning API with no timeout.  Each
//! advertising (or scan-response) packet is decoded into an
//! `AdvertisementRecord` and its report is logged before the callback
//! returns; nothing is retained between packets.

use core::fmt;

use crate::ble::adv_parser::AdvertisementRecord;
use crate::ble::report;
use crate::config::{SCAN_ACTIVE, SERVICE_UUID_SCAN};
use crate::error::BleError;
use defmt::{info, warn};
use heapless::String;
use nrf_softdevice::ble::central;
use nrf_softdevice::Softdevice;

/// Longest chunk logged at once; longer lines are split.
const LOG_LINE_CAPACITY: usize = 128;

const _: () = assert!(LOG_LINE_CAPACITY >= report::LONGEST_LINE);

/// `fmt::Write` sink that forwards complete lines to defmt.
struct LineLogger {
    line: String<LOG_LINE_CAPACITY>,
}

impl LineLogger {
    const fn new() -> Self {
        Self {
            line: String::new(),
        }
    }

    fn flush(&mut self) {
        info!("{=str}", self.line.as_str());
        self.line.clear();
    }
}

impl fmt::Write for LineLogger {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if c == '\n' {
                self.flush();
                continue;
            }
            if self.line.push(c).is_err() {
                self.flush();
                let _ = self.line.push(c);
            }
        }
        Ok(())
    }
}

/// Scan forever, logging a report for each received advertisement.
///
/// Only returns if the SoftDevice refuses to start (or aborts) the scan.
pub async fn scan_forever(sd: &Softdevice) -> Result<(), BleError> {
    info!("Starting BLE scan...");

    let config = central::ScanConfig {
        active: SCAN_ACTIVE,
        ..Default::default()
    };

    let result = central::scan(sd, &config, |params| {
        let data =
            unsafe { core::slice::from_raw_parts(params.data.p_data, params.data.len as usize) };

        let record = AdvertisementRecord::parse(params.peer_addr.addr, data);

        let mut logger = LineLogger::new();
        // LineLogger never fails; the result only matters for other sinks.
        let _ = report::write_report(&mut logger, &record, SERVICE_UUID_SCAN);
        if !logger.line.is_empty() {
            logger.flush();
        }

        // Keep scanning.
        None::<()>
    })
    .await;

    if result.is_err() {
        warn!("BLE scan ended with error");
        return Err(BleError::ScanFailed);
    }
    Ok(())
}
