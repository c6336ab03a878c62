use thiserror::Error;

use crate::layers::LayerType;

/// Errors returned while building a [`LayerRegistry`](super::LayerRegistry).
///
/// A rejected call leaves the builder unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{0} is already registered")]
    DuplicateLayerType(LayerType),
    #[error("{id} is reserved for built-in layers (custom layers start at {min})", min = LayerType::CUSTOM_MIN.0)]
    ReservedLayerType { id: LayerType },
    #[error("EtherType 0x{0:04x} is already bound")]
    DuplicateEtherType(u16),
    #[error("IP protocol {0} is already bound")]
    DuplicateIpProtocol(u8),
    #[error("{0} is not registered")]
    UnknownLayerType(LayerType),
}
