use etherparse::{TcpHeaderSlice, UdpHeader, UdpHeaderSlice};

use crate::decode::{DecodeError, NextLayer, PacketBuilder};

use super::link::require_header;
use super::{DecodedLayer, Layer, LayerType};

const TCP_MIN_HEADER_LEN: usize = 20;

#[derive(Debug, Clone)]
pub struct UdpLayer<'a> {
    pub source_port: u16,
    pub destination_port: u16,
    pub contents: &'a [u8],
    pub payload: &'a [u8],
}

impl<'a> DecodedLayer<'a> for UdpLayer<'a> {
    fn layer_type(&self) -> LayerType {
        LayerType::UDP
    }

    fn contents(&self) -> &'a [u8] {
        self.contents
    }

    fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

#[derive(Debug, Clone)]
pub struct TcpLayer<'a> {
    pub source_port: u16,
    pub destination_port: u16,
    pub sequence_number: u32,
    pub contents: &'a [u8],
    pub payload: &'a [u8],
}

impl<'a> DecodedLayer<'a> for TcpLayer<'a> {
    fn layer_type(&self) -> LayerType {
        LayerType::TCP
    }

    fn contents(&self) -> &'a [u8] {
        self.contents
    }

    fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

pub fn decode_udp<'a>(
    data: &'a [u8],
    builder: &mut PacketBuilder<'_, 'a>,
) -> Result<NextLayer, DecodeError> {
    require_header("UDP", UdpHeader::LEN, data)?;
    let header = UdpHeaderSlice::from_slice(data).map_err(|e| DecodeError::slice("UDP", e))?;
    let (contents, payload) = data.split_at(header.slice().len());

    builder.add_layer(Layer::Udp(UdpLayer {
        source_port: header.source_port(),
        destination_port: header.destination_port(),
        contents,
        payload,
    }));
    Ok(NextLayer::OpaquePayload)
}

pub fn decode_tcp<'a>(
    data: &'a [u8],
    builder: &mut PacketBuilder<'_, 'a>,
) -> Result<NextLayer, DecodeError> {
    require_header("TCP", TCP_MIN_HEADER_LEN, data)?;
    let header = TcpHeaderSlice::from_slice(data).map_err(|e| DecodeError::slice("TCP", e))?;
    let (contents, payload) = data.split_at(header.slice().len());

    builder.add_layer(Layer::Tcp(TcpLayer {
        source_port: header.source_port(),
        destination_port: header.destination_port(),
        sequence_number: header.sequence_number(),
        contents,
        payload,
    }));
    Ok(NextLayer::OpaquePayload)
}
