use crate::decode::{DecodeError, NextLayer, PacketBuilder};
use crate::layers::{DecodedLayer, Layer, LayerType};

use super::error::GooseError;
use super::layout;
use super::reader::GooseReader;

/// Decoded GOOSE header plus borrowed views into the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GooseLayer<'a> {
    pub app_id: u16,
    pub length: u16,
    /// Always zero: the reserved words are not read from the wire.
    pub reserved1: u16,
    /// Always zero: the reserved words are not read from the wire.
    pub reserved2: u16,
    pub contents: &'a [u8],
    pub payload: &'a [u8],
}

impl<'a> GooseLayer<'a> {
    /// Re-encode the fixed header from the decoded fields.
    pub fn header_bytes(&self) -> [u8; layout::HEADER_LEN] {
        let mut header = [0u8; layout::HEADER_LEN];
        header[layout::APP_ID_RANGE].copy_from_slice(&self.app_id.to_le_bytes());
        header[layout::LENGTH_RANGE].copy_from_slice(&self.length.to_le_bytes());
        header[layout::RESERVED1_RANGE].copy_from_slice(&self.reserved1.to_le_bytes());
        header[layout::RESERVED2_RANGE].copy_from_slice(&self.reserved2.to_le_bytes());
        header
    }

    /// Owned copy of the payload, for keeping it past the frame's lifetime.
    pub fn payload_to_vec(&self) -> Vec<u8> {
        self.payload.to_vec()
    }
}

impl<'a> DecodedLayer<'a> for GooseLayer<'a> {
    fn layer_type(&self) -> LayerType {
        layout::GOOSE_LAYER_TYPE
    }

    fn contents(&self) -> &'a [u8] {
        self.contents
    }

    fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

/// Parse the GOOSE header and split off its payload.
///
/// # Errors
/// `GooseError::TruncatedHeader` when fewer than eight bytes are available.
///
/// # Examples
/// ```
/// use goosecap_core::protocols::goose::parse_goose;
///
/// let data = [0x34, 0x12, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0xaa, 0xbb, 0xcc];
/// let layer = parse_goose(&data).unwrap();
/// assert_eq!(layer.app_id, 0x1234);
/// assert_eq!(layer.length, 16);
/// assert_eq!(layer.payload, &[0xaa, 0xbb, 0xcc]);
/// ```
pub fn parse_goose(data: &[u8]) -> Result<GooseLayer<'_>, GooseError> {
    let reader = GooseReader::new(data);
    reader.require_len(layout::HEADER_LEN)?;

    let app_id = reader.read_u16_le(layout::APP_ID_RANGE)?;
    let length = reader.read_u16_le(layout::LENGTH_RANGE)?;

    Ok(GooseLayer {
        app_id,
        length,
        reserved1: 0,
        reserved2: 0,
        contents: reader.header()?,
        payload: reader.payload()?,
    })
}

/// Registered decode function for the GOOSE layer.
///
/// Appends the layer and marks everything after the header as opaque
/// payload.
pub fn decode_goose<'a>(
    data: &'a [u8],
    builder: &mut PacketBuilder<'_, 'a>,
) -> Result<NextLayer, DecodeError> {
    let layer = parse_goose(data)?;
    builder.add_layer(Layer::Goose(layer));
    Ok(NextLayer::OpaquePayload)
}

#[cfg(test)]
mod tests {
    use super::parse_goose;
    use crate::decode::{DecodeError, decode_packet};
    use crate::layers::{DecodedLayer, LayerType};
    use crate::protocols::goose::error::GooseError;
    use crate::protocols::goose::layout;

    const EXAMPLE: [u8; 11] = [0x34, 0x12, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0xaa, 0xbb, 0xcc];

    fn goose_frame(goose: &[u8]) -> Vec<u8> {
        let mut frame = vec![0x01, 0x0c, 0xcd, 0x01, 0x00, 0x01];
        frame.extend_from_slice(&[0x00, 0x1a, 0xb6, 0x03, 0x2f, 0x1c]);
        frame.extend_from_slice(&layout::GOOSE_ETHER_TYPE.to_be_bytes());
        frame.extend_from_slice(goose);
        frame
    }

    #[test]
    fn parse_example_header() {
        let layer = parse_goose(&EXAMPLE).unwrap();
        assert_eq!(layer.app_id, 4660);
        assert_eq!(layer.length, 16);
        assert_eq!(layer.reserved1, 0);
        assert_eq!(layer.reserved2, 0);
        assert_eq!(layer.contents(), &EXAMPLE[..8]);
        assert_eq!(layer.payload(), &[0xaa, 0xbb, 0xcc]);
        assert_eq!(layer.layer_type(), LayerType(2001));
    }

    #[test]
    fn reserved_words_are_not_read() {
        let mut data = EXAMPLE;
        data[4..8].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let layer = parse_goose(&data).unwrap();
        assert_eq!((layer.reserved1, layer.reserved2), (0, 0));
    }

    #[test]
    fn header_fields_survive_reencoding() {
        for (app_id, length) in [(0u16, 0u16), (0x1234, 0x0010), (u16::MAX, 1), (0x00ff, 0xff00)] {
            let mut data = Vec::new();
            data.extend_from_slice(&app_id.to_le_bytes());
            data.extend_from_slice(&length.to_le_bytes());
            data.extend_from_slice(&[0u8; 4]);
            data.push(0x42);

            let layer = parse_goose(&data).unwrap();
            let header = layer.header_bytes();
            let again = parse_goose(&header).unwrap();
            assert_eq!((again.app_id, again.length), (app_id, length));
            assert_eq!(&header[..], &data[..8]);
        }
    }

    #[test]
    fn parse_short_header() {
        for len in 0..layout::HEADER_LEN {
            let data = vec![0u8; len];
            let err = parse_goose(&data).unwrap_err();
            assert_eq!(
                err,
                GooseError::TruncatedHeader {
                    needed: layout::HEADER_LEN,
                    actual: len
                }
            );
        }
    }

    #[test]
    fn ethernet_then_goose() {
        let registry = crate::default_registry().unwrap();
        let frame = goose_frame(&EXAMPLE);

        let packet = decode_packet(&registry, &frame, LayerType::ETHERNET);
        assert_eq!(packet.layer_names(&registry), vec!["Ethernet", "GOOSE"]);
        let goose = packet.goose().unwrap();
        assert_eq!(goose.app_id, 0x1234);
        assert_eq!(goose.payload_to_vec(), vec![0xaa, 0xbb, 0xcc]);
        assert!(packet.layer(layout::GOOSE_LAYER_TYPE).is_some());
    }

    #[test]
    fn truncated_goose_becomes_decode_failure() {
        let registry = crate::default_registry().unwrap();
        let frame = goose_frame(&EXAMPLE[..5]);

        let packet = decode_packet(&registry, &frame, LayerType::ETHERNET);
        assert_eq!(packet.layer_names(&registry), vec!["Ethernet", "DecodeFailure"]);
        assert!(packet.goose().is_none());
        let failure = packet.decode_failure().unwrap();
        assert_eq!(failure.data, &EXAMPLE[..5]);
        assert_eq!(
            failure.reason,
            DecodeError::Goose(GooseError::TruncatedHeader {
                needed: 8,
                actual: 5
            })
        );
    }

    #[test]
    fn empty_goose_body_stops_after_ethernet() {
        let registry = crate::default_registry().unwrap();
        let frame = goose_frame(&[]);

        let packet = decode_packet(&registry, &frame, LayerType::ETHERNET);
        assert_eq!(packet.layer_names(&registry), vec!["Ethernet"]);
        assert!(packet.decode_failure().is_none());

        let one_byte = goose_frame(&EXAMPLE[..1]);
        let packet = decode_packet(&registry, &one_byte, LayerType::ETHERNET);
        assert_eq!(packet.layer_names(&registry), vec!["Ethernet", "DecodeFailure"]);
    }

    #[test]
    fn register_twice_is_rejected() {
        let mut builder = crate::registry::RegistryBuilder::new();
        crate::protocols::goose::register(&mut builder).unwrap();
        let err = crate::protocols::goose::register(&mut builder).unwrap_err();
        assert_eq!(
            err,
            crate::registry::RegistryError::DuplicateLayerType(layout::GOOSE_LAYER_TYPE)
        );
    }
}
