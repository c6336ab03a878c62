//! Ethernet II and 802.1Q layers.

use etherparse::{Ethernet2Header, Ethernet2HeaderSlice, SingleVlanHeader, SingleVlanHeaderSlice};

use crate::decode::{DecodeError, NextLayer, PacketBuilder};

use super::{DecodedLayer, Layer, LayerType};

#[derive(Debug, Clone)]
pub struct EthernetLayer<'a> {
    pub source: [u8; 6],
    pub destination: [u8; 6],
    pub ether_type: u16,
    pub contents: &'a [u8],
    pub payload: &'a [u8],
}

impl<'a> DecodedLayer<'a> for EthernetLayer<'a> {
    fn layer_type(&self) -> LayerType {
        LayerType::ETHERNET
    }

    fn contents(&self) -> &'a [u8] {
        self.contents
    }

    fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

/// 802.1Q VLAN tag.
#[derive(Debug, Clone)]
pub struct Dot1QLayer<'a> {
    pub priority: u8,
    pub vlan_id: u16,
    pub ether_type: u16,
    pub contents: &'a [u8],
    pub payload: &'a [u8],
}

impl<'a> DecodedLayer<'a> for Dot1QLayer<'a> {
    fn layer_type(&self) -> LayerType {
        LayerType::DOT1Q
    }

    fn contents(&self) -> &'a [u8] {
        self.contents
    }

    fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

pub fn decode_ethernet<'a>(
    data: &'a [u8],
    builder: &mut PacketBuilder<'_, 'a>,
) -> Result<NextLayer, DecodeError> {
    require_header("Ethernet", Ethernet2Header::LEN, data)?;
    let header = Ethernet2HeaderSlice::from_slice(data)
        .map_err(|e| DecodeError::slice("Ethernet", e))?;
    let ether_type = header.ether_type().0;
    let (contents, payload) = data.split_at(header.slice().len());

    builder.add_layer(Layer::Ethernet(EthernetLayer {
        source: header.source(),
        destination: header.destination(),
        ether_type,
        contents,
        payload,
    }));
    Ok(next_for_ether_type(builder, ether_type))
}

pub fn decode_dot1q<'a>(
    data: &'a [u8],
    builder: &mut PacketBuilder<'_, 'a>,
) -> Result<NextLayer, DecodeError> {
    require_header("Dot1Q", SingleVlanHeader::LEN, data)?;
    let header =
        SingleVlanHeaderSlice::from_slice(data).map_err(|e| DecodeError::slice("Dot1Q", e))?;
    let ether_type = header.ether_type().0;
    let (contents, payload) = data.split_at(header.slice().len());
    let tci = u16::from_be_bytes([contents[0], contents[1]]);

    builder.add_layer(Layer::Dot1Q(Dot1QLayer {
        priority: (tci >> 13) as u8,
        vlan_id: tci & 0x0fff,
        ether_type,
        contents,
        payload,
    }));
    Ok(next_for_ether_type(builder, ether_type))
}

fn next_for_ether_type(builder: &PacketBuilder<'_, '_>, ether_type: u16) -> NextLayer {
    match builder.layer_for_ether_type(ether_type) {
        Some(next) => NextLayer::Continue(next),
        None => {
            log::trace!("no layer bound to EtherType 0x{ether_type:04x}");
            NextLayer::OpaquePayload
        }
    }
}

pub(crate) fn require_header(
    layer: &'static str,
    needed: usize,
    data: &[u8],
) -> Result<(), DecodeError> {
    if data.len() < needed {
        return Err(DecodeError::TruncatedHeader {
            layer,
            needed,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Colon-separated lowercase MAC address.
pub fn format_mac(mac: &[u8; 6]) -> String {
    mac.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}
