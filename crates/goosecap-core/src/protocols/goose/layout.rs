use crate::layers::LayerType;

pub const APP_ID_RANGE: std::ops::Range<usize> = 0..2;
pub const LENGTH_RANGE: std::ops::Range<usize> = 2..4;
pub const RESERVED1_RANGE: std::ops::Range<usize> = 4..6;
pub const RESERVED2_RANGE: std::ops::Range<usize> = 6..8;

pub const HEADER_LEN: usize = 8;
pub const PAYLOAD_OFFSET: usize = HEADER_LEN;

pub const GOOSE_ETHER_TYPE: u16 = 0x88b8;
pub const GOOSE_LAYER_TYPE: LayerType = LayerType(2001);
