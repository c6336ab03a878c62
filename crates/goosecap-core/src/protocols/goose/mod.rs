//! GOOSE-style substation-automation layer.
//!
//! Carried directly over Ethernet (EtherType 0x88B8). The layer is a fixed
//! 8-byte header (application id, length, two reserved words) followed by an
//! opaque payload that is not decoded further. Header words are read
//! little-endian; the reserved words are zero-filled rather than read.
//!
//! Wire-format details are defined in `layout`, safe reads live in `reader`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::GooseError;
pub use layout::{GOOSE_ETHER_TYPE, GOOSE_LAYER_TYPE};
pub use parser::{GooseLayer, decode_goose, parse_goose};

use crate::registry::{LayerMetadata, RegistryBuilder, RegistryError};

/// Display name the GOOSE layer is registered under.
pub const GOOSE_LAYER_NAME: &str = "GOOSE";

/// Register the GOOSE layer and route its EtherType to it.
///
/// # Errors
/// Fails when the layer id or EtherType is already taken.
pub fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder.register(
        GOOSE_LAYER_TYPE,
        LayerMetadata::new(GOOSE_LAYER_NAME, decode_goose),
    )?;
    builder.bind_ether_type(GOOSE_ETHER_TYPE, GOOSE_LAYER_TYPE)
}
