//! Decoded layer model.
//!
//! Every decoded protocol segment is a [`Layer`]. Each variant wraps a view
//! type that borrows its header (`contents`) and payload bytes from the
//! captured frame, so a packet can never outlive the frame it was decoded
//! from. The [`DecodedLayer`] trait is the capability set shared by all of
//! them.
//!
//! Built-in layers are thin wrappers over `etherparse` header slices and
//! only exist to carry the pipeline to the application layer.

use std::fmt;

use serde::Serialize;

use crate::protocols::goose::GooseLayer;

pub mod link;
pub mod network;
pub mod transport;
pub mod unclassified;

pub use link::{Dot1QLayer, EthernetLayer};
pub use network::{Ipv4Layer, Ipv6Layer};
pub use transport::{TcpLayer, UdpLayer};
pub use unclassified::UnclassifiedLayer;

/// Numeric layer-type identifier.
///
/// IDs below [`LayerType::CUSTOM_MIN`] are reserved for built-in layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LayerType(pub u16);

impl LayerType {
    pub const DECODE_FAILURE: LayerType = LayerType(1);
    pub const ETHERNET: LayerType = LayerType(2);
    pub const DOT1Q: LayerType = LayerType(3);
    pub const IPV4: LayerType = LayerType(4);
    pub const IPV6: LayerType = LayerType(5);
    pub const TCP: LayerType = LayerType(6);
    pub const UDP: LayerType = LayerType(7);

    /// First identifier available to custom layers.
    pub const CUSTOM_MIN: LayerType = LayerType(2000);

    pub fn is_builtin_range(self) -> bool {
        self < Self::CUSTOM_MIN
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerType({})", self.0)
    }
}

/// Capabilities every decoded layer exposes.
pub trait DecodedLayer<'a> {
    fn layer_type(&self) -> LayerType;
    /// Header bytes owned by this layer.
    fn contents(&self) -> &'a [u8];
    /// Bytes following the header: the next layer's input, or opaque
    /// application data.
    fn payload(&self) -> &'a [u8];
}

#[derive(Debug, Clone)]
pub enum Layer<'a> {
    Ethernet(EthernetLayer<'a>),
    Dot1Q(Dot1QLayer<'a>),
    Ipv4(Ipv4Layer<'a>),
    Ipv6(Ipv6Layer<'a>),
    Udp(UdpLayer<'a>),
    Tcp(TcpLayer<'a>),
    Goose(GooseLayer<'a>),
    Unclassified(UnclassifiedLayer<'a>),
}

impl<'a> Layer<'a> {
    fn as_dyn(&self) -> &dyn DecodedLayer<'a> {
        match self {
            Layer::Ethernet(layer) => layer,
            Layer::Dot1Q(layer) => layer,
            Layer::Ipv4(layer) => layer,
            Layer::Ipv6(layer) => layer,
            Layer::Udp(layer) => layer,
            Layer::Tcp(layer) => layer,
            Layer::Goose(layer) => layer,
            Layer::Unclassified(layer) => layer,
        }
    }

    pub fn as_ethernet(&self) -> Option<&EthernetLayer<'a>> {
        match self {
            Layer::Ethernet(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_goose(&self) -> Option<&GooseLayer<'a>> {
        match self {
            Layer::Goose(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_unclassified(&self) -> Option<&UnclassifiedLayer<'a>> {
        match self {
            Layer::Unclassified(layer) => Some(layer),
            _ => None,
        }
    }
}

impl<'a> DecodedLayer<'a> for Layer<'a> {
    fn layer_type(&self) -> LayerType {
        self.as_dyn().layer_type()
    }

    fn contents(&self) -> &'a [u8] {
        self.as_dyn().contents()
    }

    fn payload(&self) -> &'a [u8] {
        self.as_dyn().payload()
    }
}
