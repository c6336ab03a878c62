use std::io::{Read, Seek, SeekFrom};

use super::error::PcapSourceError;
use super::layout;
use pcap_parser::Linktype;

/// Read the magic bytes and rewind the reader to the start.
///
/// # Errors
/// Returns `PcapSourceError::Io` when fewer than four bytes can be read or
/// the reader cannot be rewound.
pub fn read_magic_and_rewind<R: Read + Seek>(reader: &mut R) -> Result<[u8; 4], PcapSourceError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(magic)
}

pub fn is_pcapng_magic(magic: &[u8; 4]) -> bool {
    magic == &layout::PCAPNG_MAGIC
}

/// Link type and timestamp resolution of one PCAPNG interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interface {
    pub linktype: Linktype,
    pub ts_units_per_second: u64,
}

impl Default for Interface {
    fn default() -> Self {
        Self {
            linktype: Linktype::ETHERNET,
            ts_units_per_second: layout::DEFAULT_TS_UNITS_PER_SECOND,
        }
    }
}

/// Resolve the interface for a given interface id, defaulting to Ethernet
/// with microsecond timestamps.
///
/// # Examples
/// This helper is part of an internal module, so the example is marked as
/// text example.
/// ```text
/// use pcap_parser::Linktype;
///
/// let interfaces = [Interface { linktype: Linktype::RAW, ts_units_per_second: 1_000 }];
/// assert_eq!(interface_for(&interfaces, 0).linktype, Linktype::RAW);
/// assert_eq!(interface_for(&interfaces, 1), Interface::default());
/// ```
pub fn interface_for(interfaces: &[Interface], if_id: u32) -> Interface {
    interfaces.get(if_id as usize).copied().unwrap_or_default()
}

/// Decode an `if_tsresol` value into timestamp units per second.
///
/// The high bit selects a power of two, otherwise a power of ten. Returns
/// `None` when the resolution does not fit in a `u64`.
pub fn ts_units_per_second(if_tsresol: u8) -> Option<u64> {
    let exponent = u32::from(if_tsresol & 0x7f);
    if if_tsresol & 0x80 != 0 {
        1u64.checked_shl(exponent)
    } else {
        10u64.checked_pow(exponent)
    }
}

/// Convert a PCAPNG high/low timestamp to seconds.
pub fn pcapng_ts_to_seconds(ts_high: u32, ts_low: u32, units_per_second: u64) -> f64 {
    let ts = ((ts_high as u64) << 32) | (ts_low as u64);
    let units = units_per_second.max(1);
    (ts / units) as f64 + (ts % units) as f64 / units as f64
}

/// Convert a legacy PCAP record timestamp to seconds.
///
/// `fraction` is microseconds, or nanoseconds when the file header used the
/// nanosecond magic.
pub fn legacy_ts_to_seconds(ts_sec: u32, fraction: u32, nanosecond: bool) -> f64 {
    let scale = if nanosecond { 1e-9 } else { 1e-6 };
    ts_sec as f64 + fraction as f64 * scale
}
