//! Text report for one observed advertisement.
//!
//! Writes into any `core::fmt::Write` sink: the sniffer streams it to
//! defmt line by line, tests collect it into a string.

use core::fmt::{self, Write};

use super::adv_parser::{service_label, AdvertisementRecord, UuidScan};

/// Placeholder printed for absent optional fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Largest legacy advertising payload.
pub const MAX_LEGACY_PAYLOAD: usize = 31;

/// Longest report line: `Raw Payload: ` and a full legacy payload.
pub const LONGEST_LINE: usize = "Raw Payload: ".len() + MAX_LEGACY_PAYLOAD * 3 - 1;

/// Display adapter: address octets most significant first, `aa:bb:...`.
pub struct AddressDisplay<'a>(pub &'a [u8; 6]);

impl fmt::Display for AddressDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, octet) in self.0.iter().rev().enumerate() {
            if i > 0 {
                f.write_char(':')?;
            }
            write!(f, "{:02x}", octet)?;
        }
        Ok(())
    }
}

/// Display adapter: space-separated uppercase hex octets.
pub struct HexBytes<'a>(pub &'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

/// Write the full report for `record`, one item per line.
pub fn write_report<W: Write>(
    out: &mut W,
    record: &AdvertisementRecord<'_>,
    scan: UuidScan,
) -> fmt::Result {
    writeln!(out)?;

    out.write_str("Device Name: ")?;
    match record.name {
        Some(name) => {
            // Invalid UTF-8 runs become U+FFFD; valid text passes through.
            for chunk in name.utf8_chunks() {
                out.write_str(chunk.valid())?;
                if !chunk.invalid().is_empty() {
                    out.write_char(char::REPLACEMENT_CHARACTER)?;
                }
            }
            writeln!(out)?;
        }
        None => writeln!(out, "{}", NOT_AVAILABLE)?,
    }

    writeln!(out, "Device found: {}", AddressDisplay(&record.address))?;

    match record.manufacturer_entry() {
        Some(entry) => {
            writeln!(out, "Manufacturer ID: 0x{:04X}", entry.id)?;
            writeln!(out, "Manufacturer Data: {}", HexBytes(entry.payload))?;
        }
        None => writeln!(out, "Manufacturer Data: {}", NOT_AVAILABLE)?,
    }

    writeln!(out, "Raw Payload: {}", HexBytes(record.payload))?;

    write_insights(out, record, scan)
}

/// Write the "Device Insights" block: inferred service UUIDs and labels.
pub fn write_insights<W: Write>(
    out: &mut W,
    record: &AdvertisementRecord<'_>,
    scan: UuidScan,
) -> fmt::Result {
    writeln!(out, "Device Insights:")?;
    for uuid in record.service_uuids(scan) {
        writeln!(out, "Service UUID: 0x{:04X}", uuid)?;
        if let Some(label) = service_label(uuid) {
            writeln!(out, "{}", label)?;
        }
    }
    writeln!(out, "End of insights")
}
