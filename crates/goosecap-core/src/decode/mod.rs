//! Frame → packet decoding pipeline.
//!
//! [`decode_packet`] looks up the decoder for the current layer type in the
//! registry, runs it on the remaining bytes and follows the [`NextLayer`]
//! directive it returns. The payload of the layer a decoder appended
//! becomes the input of the next decoder, so every byte of the frame ends up
//! in exactly one layer's header, in the payload of the last layer, or as
//! trailing padding a decoder left outside its declared length.
//!
//! Decoding is total: a `Continue` directive is only followed when the
//! remainder strictly shrank. Unknown layer types, decoder errors and
//! decoders that append nothing or fail to shrink the input all end the
//! packet with an `Unclassified` layer covering the bytes that were left.

use pcap_parser::Linktype;

use crate::layers::{Layer, LayerType, UnclassifiedLayer};
use crate::registry::LayerRegistry;
use crate::source::RawFrame;

mod builder;
pub mod error;
mod packet;

pub use builder::PacketBuilder;
pub use error::DecodeError;
pub use packet::Packet;

/// What the pipeline does after a decoder has appended its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextLayer {
    /// Decode the appended layer's payload as the given type.
    Continue(LayerType),
    /// The appended layer's payload is opaque application data.
    OpaquePayload,
    /// Nothing follows.
    Done,
}

/// Signature of a registered layer decoder.
///
/// A decoder reads `data`, appends one layer whose header and payload are
/// sub-slices of `data`, and says what comes next.
pub type DecodeFn =
    for<'r, 'a> fn(&'a [u8], &mut PacketBuilder<'r, 'a>) -> Result<NextLayer, DecodeError>;

/// Decode `data` starting with the `first` layer type.
pub fn decode_packet<'a>(registry: &LayerRegistry, data: &'a [u8], first: LayerType) -> Packet<'a> {
    let mut builder = PacketBuilder::new(registry);
    let mut remaining = data;
    let mut current = first;

    loop {
        let Some(metadata) = registry.lookup(current) else {
            log::debug!("{current} is not registered; {} bytes unclassified", remaining.len());
            add_unclassified(&mut builder, remaining, DecodeError::UnknownLayerType(current));
            break;
        };

        let mark = builder.len();
        let directive = match (metadata.decode)(remaining, &mut builder) {
            Ok(directive) => directive,
            Err(err) => {
                log::debug!("{} decode failed: {err}", metadata.name);
                builder.truncate(mark);
                add_unclassified(&mut builder, remaining, err);
                break;
            }
        };

        let Some(payload) = builder.payload_since(mark) else {
            add_unclassified(&mut builder, remaining, DecodeError::NoProgress(current));
            break;
        };

        match directive {
            // Nothing left to hand on: the next decoder is not run at all.
            NextLayer::Continue(_) if payload.is_empty() => break,
            NextLayer::Continue(_) if payload.len() >= remaining.len() => {
                builder.truncate(mark);
                add_unclassified(&mut builder, remaining, DecodeError::NoProgress(current));
                break;
            }
            NextLayer::Continue(next) => {
                remaining = payload;
                current = next;
            }
            NextLayer::OpaquePayload | NextLayer::Done => break,
        }
    }

    Packet::new(builder.into_layers())
}

/// Decode a captured frame, choosing the first layer from its link type.
pub fn decode_frame<'a>(registry: &LayerRegistry, frame: &'a RawFrame) -> Packet<'a> {
    match first_layer(frame.linktype, &frame.data) {
        Some(first) => decode_packet(registry, &frame.data, first),
        None => Packet::new(vec![Layer::Unclassified(UnclassifiedLayer {
            data: &frame.data,
            reason: DecodeError::UnsupportedLinktype(frame.linktype.0),
        })]),
    }
}

fn first_layer(linktype: Linktype, data: &[u8]) -> Option<LayerType> {
    match linktype {
        Linktype::ETHERNET => Some(LayerType::ETHERNET),
        Linktype::RAW | Linktype::IPV4 | Linktype::IPV6 => match data.first().map(|b| b >> 4) {
            Some(4) => Some(LayerType::IPV4),
            Some(6) => Some(LayerType::IPV6),
            _ => None,
        },
        _ => None,
    }
}

fn add_unclassified<'a>(builder: &mut PacketBuilder<'_, 'a>, data: &'a [u8], reason: DecodeError) {
    builder.add_layer(Layer::Unclassified(UnclassifiedLayer { data, reason }));
}

#[cfg(test)]
mod tests {
    use pcap_parser::Linktype;

    use super::{DecodeError, NextLayer, PacketBuilder, decode_frame, decode_packet};
    use crate::layers::{DecodedLayer, Layer, LayerType, UnclassifiedLayer};
    use crate::registry::{LayerMetadata, RegistryBuilder};
    use crate::source::RawFrame;

    const STUCK: LayerType = LayerType(2100);
    const SILENT: LayerType = LayerType(2101);
    const FAILING: LayerType = LayerType(2102);

    // Keeps all input as its own payload.
    fn decode_stuck<'a>(
        data: &'a [u8],
        builder: &mut PacketBuilder<'_, 'a>,
    ) -> Result<NextLayer, DecodeError> {
        builder.add_layer(Layer::Unclassified(UnclassifiedLayer {
            data,
            reason: DecodeError::Opaque,
        }));
        Ok(NextLayer::Continue(STUCK))
    }

    fn decode_failing<'a>(
        _data: &'a [u8],
        _builder: &mut PacketBuilder<'_, 'a>,
    ) -> Result<NextLayer, DecodeError> {
        Err(DecodeError::Slice {
            layer: "failing",
            message: "always".to_string(),
        })
    }

    // Adds nothing at all.
    fn decode_silent<'a>(
        _data: &'a [u8],
        _builder: &mut PacketBuilder<'_, 'a>,
    ) -> Result<NextLayer, DecodeError> {
        Ok(NextLayer::Done)
    }

    fn test_registry() -> crate::registry::LayerRegistry {
        let mut builder = RegistryBuilder::new();
        builder
            .register(STUCK, LayerMetadata::new("Stuck", decode_stuck))
            .unwrap();
        builder
            .register(SILENT, LayerMetadata::new("Silent", decode_silent))
            .unwrap();
        builder
            .register(FAILING, LayerMetadata::new("Failing", decode_failing))
            .unwrap();
        builder.build()
    }

    #[test]
    fn unknown_first_layer_is_unclassified() {
        let registry = test_registry();
        let data = [1u8, 2, 3];
        let packet = decode_packet(&registry, &data, LayerType(4242));
        assert_eq!(packet.layers().len(), 1);
        let failure = packet.decode_failure().unwrap();
        assert_eq!(failure.data, &data);
        assert_eq!(failure.reason, DecodeError::UnknownLayerType(LayerType(4242)));
    }

    #[test]
    fn decoder_without_progress_terminates() {
        let registry = test_registry();
        let data = [0u8; 16];
        let packet = decode_packet(&registry, &data, STUCK);
        assert_eq!(packet.layers().len(), 1);
        assert_eq!(
            packet.decode_failure().unwrap().reason,
            DecodeError::NoProgress(STUCK)
        );
    }

    #[test]
    fn decoder_adding_nothing_terminates() {
        let registry = test_registry();
        let data = [0u8; 4];
        let packet = decode_packet(&registry, &data, SILENT);
        let failure = packet.decode_failure().unwrap();
        assert_eq!(failure.reason, DecodeError::NoProgress(SILENT));
        assert_eq!(failure.data.len(), 4);
    }

    #[test]
    fn decoder_error_keeps_preceding_layers() {
        let mut builder = RegistryBuilder::new();
        builder
            .register(FAILING, LayerMetadata::new("Failing", decode_failing))
            .unwrap();
        builder.bind_ether_type(0x88b5, FAILING).unwrap();
        let registry = builder.build();

        let mut frame = vec![0xffu8; 6];
        frame.extend_from_slice(&[0x02, 0, 0, 0, 0, 1]);
        frame.extend_from_slice(&0x88b5u16.to_be_bytes());
        frame.extend_from_slice(&[9, 9, 9]);

        let packet = decode_packet(&registry, &frame, LayerType::ETHERNET);
        assert_eq!(packet.layer_names(&registry), vec!["Ethernet", "DecodeFailure"]);
        let failure = packet.decode_failure().unwrap();
        assert_eq!(failure.data, &[9, 9, 9]);
        assert!(matches!(failure.reason, DecodeError::Slice { .. }));
    }

    #[test]
    fn every_byte_is_accounted_for() {
        let registry = test_registry();
        let mut frame = vec![0x01u8; 12];
        frame.extend_from_slice(&0x0800u16.to_be_bytes());
        frame.extend_from_slice(&[0x45, 0x00]);

        let packet = decode_packet(&registry, &frame, LayerType::ETHERNET);
        assert_eq!(packet.layer_names(&registry), vec!["Ethernet", "DecodeFailure"]);
        let headers: usize = packet.layers().iter().map(|l| l.contents().len()).sum();
        let tail = packet.layers().last().map(|l| l.payload().len()).unwrap_or(0);
        assert_eq!(headers + tail, frame.len());
    }

    #[test]
    fn unsupported_linktype_yields_single_failure() {
        let registry = test_registry();
        let frame = RawFrame {
            ts: None,
            linktype: Linktype::NULL,
            data: vec![1, 2, 3, 4],
        };
        let packet = decode_frame(&registry, &frame);
        assert_eq!(packet.layers().len(), 1);
        assert_eq!(
            packet.decode_failure().unwrap().reason,
            DecodeError::UnsupportedLinktype(Linktype::NULL.0)
        );
    }

    #[test]
    fn empty_frame_is_truncated_ethernet() {
        let registry = test_registry();
        let packet = decode_packet(&registry, &[], LayerType::ETHERNET);
        assert!(matches!(
            packet.decode_failure().unwrap().reason,
            DecodeError::TruncatedHeader {
                layer: "Ethernet",
                ..
            }
        ));
    }
}
