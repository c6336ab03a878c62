//! Layer type registry.
//!
//! A [`RegistryBuilder`] collects layer metadata and protocol bindings at
//! startup; [`RegistryBuilder::build`] freezes them into an immutable
//! [`LayerRegistry`] that is passed explicitly to the decoding pipeline.
//!
//! Duplicate registrations are rejected: the first registration for an ID
//! (or EtherType, or IP protocol) always wins and the second call returns an
//! error.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::decode::{DecodeError, DecodeFn, NextLayer, PacketBuilder};
use crate::layers::{Layer, LayerType, UnclassifiedLayer, link, network, transport};

pub mod error;

pub use error::RegistryError;

const ETHER_TYPE_IPV4: u16 = 0x0800;
const ETHER_TYPE_IPV6: u16 = 0x86dd;
const ETHER_TYPE_VLAN: u16 = 0x8100;
const IP_PROTOCOL_TCP: u8 = 6;
const IP_PROTOCOL_UDP: u8 = 17;

#[derive(Debug, Clone)]
pub struct LayerMetadata {
    pub name: String,
    pub decode: DecodeFn,
}

impl LayerMetadata {
    pub fn new(name: impl Into<String>, decode: DecodeFn) -> Self {
        Self {
            name: name.into(),
            decode,
        }
    }
}

/// Immutable dispatch table from layer type to metadata.
#[derive(Debug, Clone)]
pub struct LayerRegistry {
    layers: HashMap<LayerType, LayerMetadata>,
    ether_types: HashMap<u16, LayerType>,
    ip_protocols: HashMap<u8, LayerType>,
}

impl LayerRegistry {
    pub fn lookup(&self, id: LayerType) -> Option<&LayerMetadata> {
        self.layers.get(&id)
    }

    pub fn name(&self, id: LayerType) -> Option<&str> {
        self.lookup(id).map(|metadata| metadata.name.as_str())
    }

    pub fn layer_for_ether_type(&self, ether_type: u16) -> Option<LayerType> {
        self.ether_types.get(&ether_type).copied()
    }

    pub fn layer_for_ip_protocol(&self, protocol: u8) -> Option<LayerType> {
        self.ip_protocols.get(&protocol).copied()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

pub struct RegistryBuilder {
    layers: HashMap<LayerType, LayerMetadata>,
    ether_types: HashMap<u16, LayerType>,
    ip_protocols: HashMap<u8, LayerType>,
}

impl RegistryBuilder {
    /// Builder pre-populated with the built-in layers and their bindings.
    pub fn new() -> Self {
        let mut builder = Self {
            layers: HashMap::new(),
            ether_types: HashMap::new(),
            ip_protocols: HashMap::new(),
        };
        builder.insert_builtin(LayerType::DECODE_FAILURE, "DecodeFailure", decode_failure);
        builder.insert_builtin(LayerType::ETHERNET, "Ethernet", link::decode_ethernet);
        builder.insert_builtin(LayerType::DOT1Q, "Dot1Q", link::decode_dot1q);
        builder.insert_builtin(LayerType::IPV4, "IPv4", network::decode_ipv4);
        builder.insert_builtin(LayerType::IPV6, "IPv6", network::decode_ipv6);
        builder.insert_builtin(LayerType::TCP, "TCP", transport::decode_tcp);
        builder.insert_builtin(LayerType::UDP, "UDP", transport::decode_udp);

        builder.ether_types.insert(ETHER_TYPE_IPV4, LayerType::IPV4);
        builder.ether_types.insert(ETHER_TYPE_IPV6, LayerType::IPV6);
        builder.ether_types.insert(ETHER_TYPE_VLAN, LayerType::DOT1Q);
        builder.ip_protocols.insert(IP_PROTOCOL_TCP, LayerType::TCP);
        builder.ip_protocols.insert(IP_PROTOCOL_UDP, LayerType::UDP);
        builder
    }

    fn insert_builtin(&mut self, id: LayerType, name: &str, decode: DecodeFn) {
        self.layers.insert(id, LayerMetadata::new(name, decode));
    }

    /// Register a custom layer type.
    ///
    /// # Errors
    /// `ReservedLayerType` for IDs below [`LayerType::CUSTOM_MIN`],
    /// `DuplicateLayerType` when the ID is taken.
    pub fn register(
        &mut self,
        id: LayerType,
        metadata: LayerMetadata,
    ) -> Result<(), RegistryError> {
        if id.is_builtin_range() {
            return Err(RegistryError::ReservedLayerType { id });
        }
        match self.layers.entry(id) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateLayerType(id)),
            Entry::Vacant(slot) => {
                log::debug!("registered layer {} as {id}", metadata.name);
                slot.insert(metadata);
                Ok(())
            }
        }
    }

    /// Route frames carrying `ether_type` to the layer `id`.
    pub fn bind_ether_type(&mut self, ether_type: u16, id: LayerType) -> Result<(), RegistryError> {
        self.require_registered(id)?;
        match self.ether_types.entry(ether_type) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateEtherType(ether_type)),
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
        }
    }

    /// Route IP payloads with protocol number `protocol` to the layer `id`.
    pub fn bind_ip_protocol(&mut self, protocol: u8, id: LayerType) -> Result<(), RegistryError> {
        self.require_registered(id)?;
        match self.ip_protocols.entry(protocol) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateIpProtocol(protocol)),
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
        }
    }

    fn require_registered(&self, id: LayerType) -> Result<(), RegistryError> {
        if self.layers.contains_key(&id) {
            Ok(())
        } else {
            Err(RegistryError::UnknownLayerType(id))
        }
    }

    pub fn build(self) -> LayerRegistry {
        LayerRegistry {
            layers: self.layers,
            ether_types: self.ether_types,
            ip_protocols: self.ip_protocols,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// Decoding straight into DecodeFailure keeps the bytes opaque.
fn decode_failure<'a>(
    data: &'a [u8],
    builder: &mut PacketBuilder<'_, 'a>,
) -> Result<NextLayer, DecodeError> {
    builder.add_layer(Layer::Unclassified(UnclassifiedLayer {
        data,
        reason: DecodeError::Opaque,
    }));
    Ok(NextLayer::Done)
}
