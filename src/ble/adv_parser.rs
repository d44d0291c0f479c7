//! Raw BLE advertisement payload parsing.
//!
//! A payload is a run of AD structures: `[len][type][len - 1 data bytes]`.
//! Every walk here is bounds-checked; a truncated or zero-length
//! structure simply ends the walk.

/// AD type: incomplete list of 16-bit service UUIDs.
pub const AD_TYPE_UUID16_INCOMPLETE: u8 = 0x02;
/// AD type: complete list of 16-bit service UUIDs.
pub const AD_TYPE_UUID16_COMPLETE: u8 = 0x03;
/// AD type: shortened local name.
pub const AD_TYPE_SHORT_NAME: u8 = 0x08;
/// AD type: complete local name.
pub const AD_TYPE_COMPLETE_NAME: u8 = 0x09;
/// AD type: manufacturer specific data.
pub const AD_TYPE_MANUFACTURER_DATA: u8 = 0xFF;

/// Well-known 16-bit service UUIDs and the label the sniffer prints for them.
const KNOWN_SERVICES: &[(u16, &str)] = &[
    (0x180F, "Heart Rate Service"),
    (0x180A, "Device Information Service"),
];

/// Strategy used to infer 16-bit service UUIDs from a payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UuidScan {
    /// Walk AD structures and read every little-endian entry of the
    /// 0x02 / 0x03 lists.
    AdStructure,
    /// Byte-wise scan ignoring structure boundaries: every byte equal to
    /// 0x02 or 0x03 at index `i < len - 2` yields `(p[i + 1] << 8) | p[i]`.
    LegacyByteScan,
}

/// Iterator over the `(ad_type, data)` pairs of a payload.
#[derive(Clone)]
pub struct AdStructures<'a> {
    data: &'a [u8],
}

/// Walk the AD structures of `data`.
pub fn ad_structures(data: &[u8]) -> AdStructures<'_> {
    AdStructures { data }
}

impl<'a> Iterator for AdStructures<'a> {
    type Item = (u8, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, rest) = self.data.split_first()?;
        let len = len as usize;
        if len == 0 || rest.len() < len {
            self.data = &[];
            return None;
        }
        let (structure, tail) = rest.split_at(len);
        self.data = tail;
        Some((structure[0], &structure[1..]))
    }
}

fn find_ad<'a>(data: &'a [u8], wanted: &[u8]) -> Option<&'a [u8]> {
    ad_structures(data)
        .find(|(ad_type, _)| wanted.contains(ad_type))
        .map(|(_, value)| value)
}

/// Complete or shortened local name, if advertised and non-empty.
///
/// The bytes are returned as-is; the report decodes them as UTF-8.
pub fn device_name(data: &[u8]) -> Option<&[u8]> {
    find_ad(data, &[AD_TYPE_COMPLETE_NAME, AD_TYPE_SHORT_NAME]).filter(|name| !name.is_empty())
}

/// Raw manufacturer-specific data (AD type 0xFF), if advertised.
pub fn manufacturer_data(data: &[u8]) -> Option<&[u8]> {
    find_ad(data, &[AD_TYPE_MANUFACTURER_DATA])
}

/// Manufacturer entry split into its id and opaque payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManufacturerData<'a> {
    /// First two bytes, read big-endian.
    pub id: u16,
    /// Everything after the id.
    pub payload: &'a [u8],
}

impl<'a> ManufacturerData<'a> {
    /// Split raw manufacturer data; `None` when shorter than the id.
    pub fn parse(raw: &'a [u8]) -> Option<Self> {
        match raw {
            [hi, lo, payload @ ..] => Some(Self {
                id: u16::from_be_bytes([*hi, *lo]),
                payload,
            }),
            _ => None,
        }
    }
}

/// Label for a well-known service UUID.
pub fn service_label(uuid: u16) -> Option<&'static str> {
    KNOWN_SERVICES
        .iter()
        .find_map(|&(known, label)| (known == uuid).then_some(label))
}

/// Iterator over the inferred 16-bit service UUIDs of a payload.
pub struct ServiceUuids<'a> {
    data: &'a [u8],
    mode: UuidScan,
    // AdStructure: remaining AD structures plus the list being drained.
    structures: AdStructures<'a>,
    list: &'a [u8],
    // LegacyByteScan: next byte index.
    index: usize,
}

/// Infer the service UUIDs advertised in `data` using `mode`.
pub fn service_uuids(data: &[u8], mode: UuidScan) -> ServiceUuids<'_> {
    ServiceUuids {
        data,
        mode,
        structures: ad_structures(data),
        list: &[],
        index: 0,
    }
}

impl ServiceUuids<'_> {
    fn next_listed(&mut self) -> Option<u16> {
        loop {
            if let [lo, hi, rest @ ..] = self.list {
                self.list = rest;
                return Some(u16::from_le_bytes([*lo, *hi]));
            }
            let (ad_type, value) = self.structures.next()?;
            if ad_type == AD_TYPE_UUID16_INCOMPLETE || ad_type == AD_TYPE_UUID16_COMPLETE {
                self.list = value;
            }
        }
    }

    fn next_scanned(&mut self) -> Option<u16> {
        let end = self.data.len().saturating_sub(2);
        while self.index < end {
            let i = self.index;
            self.index += 1;
            let byte = self.data[i];
            if byte == AD_TYPE_UUID16_INCOMPLETE || byte == AD_TYPE_UUID16_COMPLETE {
                return Some(((self.data[i + 1] as u16) << 8) | byte as u16);
            }
        }
        None
    }
}

impl Iterator for ServiceUuids<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        match self.mode {
            UuidScan::AdStructure => self.next_listed(),
            UuidScan::LegacyByteScan => self.next_scanned(),
        }
    }
}

/// One observed advertising packet, borrowed from the scan callback.
#[derive(Clone, Copy, Debug)]
pub struct AdvertisementRecord<'a> {
    /// Device address as delivered by the radio (least significant octet first).
    pub address: [u8; 6],
    /// Advertised local name, if any.
    pub name: Option<&'a [u8]>,
    /// Raw manufacturer data (id + payload), if any.
    pub manufacturer: Option<&'a [u8]>,
    /// The full advertising payload.
    pub payload: &'a [u8],
}

impl<'a> AdvertisementRecord<'a> {
    /// Decode name and manufacturer data from a raw payload.
    pub fn parse(address: [u8; 6], payload: &'a [u8]) -> Self {
        Self {
            address,
            name: device_name(payload),
            manufacturer: manufacturer_data(payload),
            payload,
        }
    }

    /// Manufacturer id and payload; `None` when absent or shorter than 2 bytes.
    pub fn manufacturer_entry(&self) -> Option<ManufacturerData<'a>> {
        self.manufacturer.and_then(ManufacturerData::parse)
    }

    /// Inferred service UUIDs.
    pub fn service_uuids(&self, mode: UuidScan) -> ServiceUuids<'a> {
        service_uuids(self.payload, mode)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests (run on host, not embedded)
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn uuids(data: &[u8], mode: UuidScan) -> std::vec::Vec<u16> {
        service_uuids(data, mode).collect()
    }

    #[test]
    fn found_values_borrow_from_the_payload() {
        let payload = std::vec![0x03, 0x09, b'h', b'i', 0x03, 0xFF, 0x01, 0x02];
        let (name, manufacturer) = {
            let wanted = [AD_TYPE_COMPLETE_NAME];
            (find_ad(&payload, &wanted), manufacturer_data(&payload))
        };
        assert_eq!(name, Some(&b"hi"[..]));
        assert_eq!(manufacturer.map(|m| m.as_ptr()), Some(payload[6..].as_ptr()));
    }

    #[test]
    fn walks_ad_structures_in_order() {
        let ad_data = [
            0x02, 0x01, 0x06, // Flags
            0x03, 0x03, 0x0F, 0x18, // Complete 16-bit UUIDs
        ];
        let found: std::vec::Vec<_> = ad_structures(&ad_data).collect();
        assert_eq!(found, [(0x01, &[0x06][..]), (0x03, &[0x0F, 0x18][..])]);
    }

    #[test]
    fn walk_stops_on_zero_length() {
        let ad_data = [0x00, 0x02, 0x01, 0x06];
        assert_eq!(ad_structures(&ad_data).count(), 0);
    }

    #[test]
    fn walk_stops_on_truncated_structure() {
        let ad_data = [0x02, 0x01, 0x06, 0x05, 0x09, b'a'];
        assert_eq!(ad_structures(&ad_data).count(), 1);
    }

    #[test]
    fn extract_complete_local_name() {
        let ad_data = [
            0x09, 0x09, // len=9, type=0x09
            b'K', b'e', b'y', b'b', b'o', b'a', b'r', b'd',
        ];
        assert_eq!(device_name(&ad_data), Some(&b"Keyboard"[..]));
    }

    #[test]
    fn extract_shortened_local_name() {
        let ad_data = [0x05, 0x08, b'B', b'T', b' ', b'K'];
        assert_eq!(device_name(&ad_data), Some(&b"BT K"[..]));
    }

    #[test]
    fn empty_name_counts_as_absent() {
        let ad_data = [0x01, 0x09];
        assert_eq!(device_name(&ad_data), None);
    }

    #[test]
    fn no_name_in_advertisement() {
        let ad_data = [0x02, 0x01, 0x06];
        assert_eq!(device_name(&ad_data), None);
    }

    #[test]
    fn manufacturer_id_is_big_endian() {
        let entry = ManufacturerData::parse(&[0x4C, 0x00, 0x02, 0x15]).unwrap();
        assert_eq!(entry.id, 0x4C00);
        assert_eq!(entry.payload, &[0x02, 0x15]);
    }

    #[test]
    fn manufacturer_id_only() {
        let entry = ManufacturerData::parse(&[0x01, 0x02]).unwrap();
        assert_eq!(entry.id, 0x0102);
        assert!(entry.payload.is_empty());
    }

    #[test]
    fn manufacturer_data_too_short() {
        assert!(ManufacturerData::parse(&[]).is_none());
        assert!(ManufacturerData::parse(&[0x4C]).is_none());
    }

    #[test]
    fn ad_structure_scan_reads_little_endian_lists() {
        let ad_data = [
            0x07, 0x03, // len=7, type=0x03 (Complete 16-bit UUIDs)
            0x0F, 0x18, // Battery
            0x12, 0x18, // HID
            0x0A, 0x18, // Device Information
        ];
        assert_eq!(
            uuids(&ad_data, UuidScan::AdStructure),
            [0x180F, 0x1812, 0x180A]
        );
    }

    #[test]
    fn ad_structure_scan_covers_incomplete_lists_and_odd_tails() {
        let ad_data = [
            0x04, 0x02, 0x0D, 0x18, 0xAA, // odd trailing byte ignored
            0x03, 0x03, 0x0A, 0x18,
        ];
        assert_eq!(uuids(&ad_data, UuidScan::AdStructure), [0x180D, 0x180A]);
    }

    #[test]
    fn ad_structure_scan_ignores_other_types() {
        let ad_data = [0x02, 0x01, 0x06, 0x03, 0xFF, 0x03, 0x02];
        assert!(uuids(&ad_data, UuidScan::AdStructure).is_empty());
    }

    #[test]
    fn legacy_scan_reads_swapped_pair_at_marker() {
        // Flags structure: the length byte 0x02 is itself a marker.
        let ad_data = [0x02, 0x01, 0x06];
        assert_eq!(uuids(&ad_data, UuidScan::LegacyByteScan), [0x0102]);
    }

    #[test]
    fn legacy_scan_matches_every_marker_byte() {
        let ad_data = [0x03, 0x03, 0x0F, 0x18];
        // i=0 -> (p[1] << 8) | p[0] = 0x0303, i=1 -> (p[2] << 8) | p[1] = 0x0F03
        assert_eq!(
            uuids(&ad_data, UuidScan::LegacyByteScan),
            [0x0303, 0x0F03]
        );
    }

    #[test]
    fn legacy_scan_skips_last_two_bytes() {
        let ad_data = [0x00, 0x03, 0x02];
        assert_eq!(uuids(&ad_data, UuidScan::LegacyByteScan), [] as [u16; 0]);
    }

    #[test]
    fn scans_terminate_on_tiny_payloads() {
        for data in [&[][..], &[0x02][..], &[0x03, 0x03][..]] {
            assert!(uuids(data, UuidScan::LegacyByteScan).is_empty());
            assert!(uuids(data, UuidScan::AdStructure).is_empty());
        }
    }

    #[test]
    fn scans_stay_in_bounds_for_every_byte_pattern() {
        let mut data = [0u8; 12];
        for seed in 0u8..=255 {
            for (i, b) in data.iter_mut().enumerate() {
                *b = seed.wrapping_mul(31).wrapping_add(i as u8 * 7) % 5;
            }
            for len in 0..=data.len() {
                let slice = &data[..len];
                assert!(service_uuids(slice, UuidScan::LegacyByteScan).count() <= len);
                assert!(service_uuids(slice, UuidScan::AdStructure).count() <= len);
            }
        }
    }

    #[test]
    fn known_service_labels() {
        assert_eq!(service_label(0x180F), Some("Heart Rate Service"));
        assert_eq!(service_label(0x180A), Some("Device Information Service"));
        assert_eq!(service_label(0x1812), None);
        assert_eq!(service_label(0x0000), None);
    }

    #[test]
    fn record_decodes_name_and_manufacturer() {
        let payload = [
            0x02, 0x01, 0x06, // Flags
            0x05, 0xFF, 0x4C, 0x00, 0x10, 0x05, // Manufacturer data
            0x04, 0x09, b'T', b'a', b'g', // Name
        ];
        let record = AdvertisementRecord::parse([1, 2, 3, 4, 5, 6], &payload);
        assert_eq!(record.name, Some(&b"Tag"[..]));
        let entry = record.manufacturer_entry().unwrap();
        assert_eq!(entry.id, 0x4C00);
        assert_eq!(entry.payload, &[0x10, 0x05]);
    }
}
