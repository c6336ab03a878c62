use crate::layers::{DecodedLayer, EthernetLayer, Layer, LayerType, UnclassifiedLayer};
use crate::protocols::goose::GooseLayer;
use crate::registry::LayerRegistry;

/// Layers decoded from one frame, in decode order (link layer first).
///
/// Read-only once built. Borrows from the frame's bytes.
#[derive(Debug, Clone)]
pub struct Packet<'a> {
    layers: Vec<Layer<'a>>,
}

impl<'a> Packet<'a> {
    pub(crate) fn new(layers: Vec<Layer<'a>>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[Layer<'a>] {
        &self.layers
    }

    /// First layer of the given type, or `None` when the packet has none.
    pub fn layer(&self, layer_type: LayerType) -> Option<&Layer<'a>> {
        self.layers
            .iter()
            .find(|layer| layer.layer_type() == layer_type)
    }

    pub fn ethernet(&self) -> Option<&EthernetLayer<'a>> {
        self.layers.iter().find_map(Layer::as_ethernet)
    }

    pub fn goose(&self) -> Option<&GooseLayer<'a>> {
        self.layers.iter().find_map(Layer::as_goose)
    }

    pub fn decode_failure(&self) -> Option<&UnclassifiedLayer<'a>> {
        self.layers.iter().find_map(Layer::as_unclassified)
    }

    /// Registered names of every layer, in decode order.
    pub fn layer_names(&self, registry: &LayerRegistry) -> Vec<String> {
        self.layers
            .iter()
            .map(|layer| {
                let layer_type = layer.layer_type();
                registry
                    .name(layer_type)
                    .map(str::to_string)
                    .unwrap_or_else(|| layer_type.to_string())
            })
            .collect()
    }
}
