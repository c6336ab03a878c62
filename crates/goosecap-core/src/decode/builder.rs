use crate::layers::{DecodedLayer, Layer, LayerType};
use crate::registry::LayerRegistry;

/// Accumulates the layers of one packet while decoders run.
///
/// Decoders append exactly one layer per call through
/// [`PacketBuilder::add_layer`] and consult the registry's EtherType and
/// IP-protocol bindings to name the next layer.
pub struct PacketBuilder<'r, 'a> {
    registry: &'r LayerRegistry,
    layers: Vec<Layer<'a>>,
}

impl<'r, 'a> PacketBuilder<'r, 'a> {
    pub(crate) fn new(registry: &'r LayerRegistry) -> Self {
        Self {
            registry,
            layers: Vec::new(),
        }
    }

    pub fn add_layer(&mut self, layer: Layer<'a>) {
        self.layers.push(layer);
    }

    pub fn layer_for_ether_type(&self, ether_type: u16) -> Option<LayerType> {
        self.registry.layer_for_ether_type(ether_type)
    }

    pub fn layer_for_ip_protocol(&self, protocol: u8) -> Option<LayerType> {
        self.registry.layer_for_ip_protocol(protocol)
    }

    pub(crate) fn len(&self) -> usize {
        self.layers.len()
    }

    /// Payload of the most recent layer, if it was added after `mark`.
    pub(crate) fn payload_since(&self, mark: usize) -> Option<&'a [u8]> {
        if self.layers.len() > mark {
            self.layers.last().map(|layer| layer.payload())
        } else {
            None
        }
    }

    /// Drops layers added after `mark` by a decoder that then failed.
    pub(crate) fn truncate(&mut self, mark: usize) {
        self.layers.truncate(mark);
    }

    pub(crate) fn into_layers(self) -> Vec<Layer<'a>> {
        self.layers
    }
}
