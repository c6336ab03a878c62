#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const GOOSE_ETHER_TYPE: u16 = 0x88b8;
pub const SRC_MAC: [u8; 6] = [0x00, 0x1a, 0xb6, 0x03, 0x2f, 0x1c];
pub const DST_MAC: [u8; 6] = [0x01, 0x0c, 0xcd, 0x01, 0x00, 0x01];

pub fn goose_body(app_id: u16, length: u16, payload: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(8 + payload.len());
    body.extend_from_slice(&app_id.to_le_bytes());
    body.extend_from_slice(&length.to_le_bytes());
    body.extend_from_slice(&[0u8; 4]);
    body.extend_from_slice(payload);
    body
}

pub fn ethernet_frame(ether_type: u16, body: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(14 + body.len());
    frame.extend_from_slice(&DST_MAC);
    frame.extend_from_slice(&SRC_MAC);
    frame.extend_from_slice(&ether_type.to_be_bytes());
    frame.extend_from_slice(body);
    frame
}

pub fn goose_frame(app_id: u16, length: u16, payload: &[u8]) -> Vec<u8> {
    ethernet_frame(GOOSE_ETHER_TYPE, &goose_body(app_id, length, payload))
}

pub fn udp_frame(payload: &[u8]) -> Vec<u8> {
    let builder = etherparse::PacketBuilder::ethernet2(SRC_MAC, DST_MAC)
        .ipv4([10, 0, 0, 1], [10, 0, 0, 2], 64)
        .udp(102, 102);
    let mut frame = Vec::<u8>::with_capacity(builder.size(payload.len()));
    builder.write(&mut frame, payload).expect("write udp frame");
    frame
}

/// Big-endian PCAPNG with one Ethernet interface; timestamps in µs.
pub fn write_pcapng(path: &Path, packets: &[(u64, Vec<u8>)]) {
    write_pcapng_with_tsresol(path, None, packets);
}

/// Like [`write_pcapng`], with an optional `if_tsresol` option on the
/// interface. Timestamps are in the interface's units.
pub fn write_pcapng_with_tsresol(path: &Path, tsresol: Option<u8>, packets: &[(u64, Vec<u8>)]) {
    let mut output = Vec::new();
    output.extend_from_slice(&pcapng_block(0x0A0D0D0A, &section_header_body()));
    output.extend_from_slice(&pcapng_block(1, &interface_desc_body(tsresol)));
    for (ts, data) in packets {
        output.extend_from_slice(&pcapng_block(6, &enhanced_packet_body(*ts, data)));
    }
    fs::write(path, output).expect("write pcapng");
}

/// Little-endian legacy PCAP (microsecond magic, Ethernet link type).
pub fn write_pcap(path: &Path, packets: &[(u32, u32, Vec<u8>)]) {
    write_pcap_with_magic(path, 0xa1b2c3d4, packets);
}

/// Little-endian legacy PCAP with the nanosecond magic.
pub fn write_pcap_nanos(path: &Path, packets: &[(u32, u32, Vec<u8>)]) {
    write_pcap_with_magic(path, 0xa1b23c4d, packets);
}

fn write_pcap_with_magic(path: &Path, magic: u32, packets: &[(u32, u32, Vec<u8>)]) {
    let mut output = Vec::new();
    output.extend_from_slice(&magic.to_le_bytes());
    output.extend_from_slice(&2u16.to_le_bytes());
    output.extend_from_slice(&4u16.to_le_bytes());
    output.extend_from_slice(&0i32.to_le_bytes());
    output.extend_from_slice(&0u32.to_le_bytes());
    output.extend_from_slice(&65535u32.to_le_bytes());
    output.extend_from_slice(&1u32.to_le_bytes());
    for (ts_sec, ts_fraction, data) in packets {
        output.extend_from_slice(&ts_sec.to_le_bytes());
        output.extend_from_slice(&ts_fraction.to_le_bytes());
        output.extend_from_slice(&(data.len() as u32).to_le_bytes());
        output.extend_from_slice(&(data.len() as u32).to_le_bytes());
        output.extend_from_slice(data);
    }
    fs::write(path, output).expect("write pcap");
}

fn pcapng_block(block_type: u32, body: &[u8]) -> Vec<u8> {
    let total_len = (8 + body.len() + 4) as u32;
    let mut block = Vec::with_capacity(total_len as usize);
    block.extend_from_slice(&block_type.to_be_bytes());
    block.extend_from_slice(&total_len.to_be_bytes());
    block.extend_from_slice(body);
    block.extend_from_slice(&total_len.to_be_bytes());
    block
}

fn section_header_body() -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&0x1A2B3C4Du32.to_be_bytes());
    body.extend_from_slice(&1u16.to_be_bytes());
    body.extend_from_slice(&0u16.to_be_bytes());
    body.extend_from_slice(&(-1i64).to_be_bytes());
    body
}

fn interface_desc_body(tsresol: Option<u8>) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&1u16.to_be_bytes());
    body.extend_from_slice(&0u16.to_be_bytes());
    body.extend_from_slice(&65535u32.to_be_bytes());
    if let Some(tsresol) = tsresol {
        // if_tsresol (code 9), padded to 32 bits, then opt_endofopt.
        body.extend_from_slice(&9u16.to_be_bytes());
        body.extend_from_slice(&1u16.to_be_bytes());
        body.extend_from_slice(&[tsresol, 0, 0, 0]);
        body.extend_from_slice(&0u16.to_be_bytes());
        body.extend_from_slice(&0u16.to_be_bytes());
    }
    body
}

fn enhanced_packet_body(ts: u64, data: &[u8]) -> Vec<u8> {
    let ts_high = ((ts >> 32) & 0xFFFF_FFFF) as u32;
    let ts_low = (ts & 0xFFFF_FFFF) as u32;
    let cap_len = data.len() as u32;
    let mut body = Vec::new();
    body.extend_from_slice(&0u32.to_be_bytes());
    body.extend_from_slice(&ts_high.to_be_bytes());
    body.extend_from_slice(&ts_low.to_be_bytes());
    body.extend_from_slice(&cap_len.to_be_bytes());
    body.extend_from_slice(&cap_len.to_be_bytes());
    body.extend_from_slice(data);
    let pad_len = (4 - (data.len() % 4)) % 4;
    body.extend(std::iter::repeat_n(0u8, pad_len));
    body
}
