//! IPv4 and IPv6 layers.
//!
//! Only the fixed header (plus IPv4 options) is claimed; IPv6 extension
//! headers are left in the payload. The payload ends where the header's
//! length field says it does, so link-layer padding stays with the layer
//! below.

use std::net::{Ipv4Addr, Ipv6Addr};

use etherparse::{Ipv4HeaderSlice, Ipv6Header, Ipv6HeaderSlice};

use crate::decode::{DecodeError, NextLayer, PacketBuilder};

use super::link::require_header;
use super::{DecodedLayer, Layer, LayerType};

const IPV4_MIN_HEADER_LEN: usize = 20;

#[derive(Debug, Clone)]
pub struct Ipv4Layer<'a> {
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    pub protocol: u8,
    pub ttl: u8,
    pub contents: &'a [u8],
    pub payload: &'a [u8],
}

impl<'a> DecodedLayer<'a> for Ipv4Layer<'a> {
    fn layer_type(&self) -> LayerType {
        LayerType::IPV4
    }

    fn contents(&self) -> &'a [u8] {
        self.contents
    }

    fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

#[derive(Debug, Clone)]
pub struct Ipv6Layer<'a> {
    pub source: Ipv6Addr,
    pub destination: Ipv6Addr,
    pub next_header: u8,
    pub hop_limit: u8,
    pub contents: &'a [u8],
    pub payload: &'a [u8],
}

impl<'a> DecodedLayer<'a> for Ipv6Layer<'a> {
    fn layer_type(&self) -> LayerType {
        LayerType::IPV6
    }

    fn contents(&self) -> &'a [u8] {
        self.contents
    }

    fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

pub fn decode_ipv4<'a>(
    data: &'a [u8],
    builder: &mut PacketBuilder<'_, 'a>,
) -> Result<NextLayer, DecodeError> {
    require_header("IPv4", IPV4_MIN_HEADER_LEN, data)?;
    let header = Ipv4HeaderSlice::from_slice(data).map_err(|e| DecodeError::slice("IPv4", e))?;
    let protocol = header.protocol().0;
    let header_len = header.slice().len();
    let end = declared_end(data.len(), header_len, usize::from(header.total_len()));
    let (contents, payload) = data[..end].split_at(header_len);

    builder.add_layer(Layer::Ipv4(Ipv4Layer {
        source: header.source_addr(),
        destination: header.destination_addr(),
        protocol,
        ttl: header.ttl(),
        contents,
        payload,
    }));
    Ok(next_for_ip_protocol(builder, protocol))
}

pub fn decode_ipv6<'a>(
    data: &'a [u8],
    builder: &mut PacketBuilder<'_, 'a>,
) -> Result<NextLayer, DecodeError> {
    require_header("IPv6", Ipv6Header::LEN, data)?;
    let header = Ipv6HeaderSlice::from_slice(data).map_err(|e| DecodeError::slice("IPv6", e))?;
    let next_header = header.next_header().0;
    let header_len = header.slice().len();
    let declared = match usize::from(header.payload_length()) {
        0 => 0,
        payload_len => header_len + payload_len,
    };
    let end = declared_end(data.len(), header_len, declared);
    let (contents, payload) = data[..end].split_at(header_len);

    builder.add_layer(Layer::Ipv6(Ipv6Layer {
        source: header.source_addr(),
        destination: header.destination_addr(),
        next_header,
        hop_limit: header.hop_limit(),
        contents,
        payload,
    }));
    Ok(next_for_ip_protocol(builder, next_header))
}

/// End of the datagram within `available` captured bytes.
///
/// A declared length of zero (segmentation offload, jumbograms) or one past
/// the capture falls back to the captured bytes.
fn declared_end(available: usize, header_len: usize, declared: usize) -> usize {
    if declared == 0 || declared > available {
        available
    } else {
        declared.max(header_len)
    }
}

fn next_for_ip_protocol(builder: &PacketBuilder<'_, '_>, protocol: u8) -> NextLayer {
    match builder.layer_for_ip_protocol(protocol) {
        Some(next) => NextLayer::Continue(next),
        None => NextLayer::OpaquePayload,
    }
}
