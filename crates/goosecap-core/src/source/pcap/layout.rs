pub const PCAP_READER_BUFFER_SIZE: usize = 64 * 1024;
pub const PCAPNG_MAGIC: [u8; 4] = [0x0a, 0x0d, 0x0d, 0x0a];

/// PCAPNG timestamp units when an interface carries no `if_tsresol` option.
pub const DEFAULT_TS_UNITS_PER_SECOND: u64 = 1_000_000;
