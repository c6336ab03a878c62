//! Per-packet inspection.
//!
//! [`inspect`] pulls the Ethernet and GOOSE layers out of a decoded packet
//! and copies what it needs into an owned [`PacketSummary`], so the summary
//! can outlive the frame. A missing layer is not an error; it is simply left
//! out of the summary.

use serde::Serialize;

use crate::decode::Packet;
use crate::layers::link::format_mac;
use crate::registry::LayerRegistry;

mod format;

pub use format::{format_hex, ts_to_rfc3339};

/// Owned, serialisable summary of one decoded packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PacketSummary {
    /// Zero-based position of the frame in the capture.
    pub index: u64,
    /// RFC 3339 capture time, when the source recorded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goose: Option<GooseSummary>,
    /// Layer names in decode order.
    pub layers: Vec<String>,
    /// Reason the last layer could not be classified, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_failure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSummary {
    pub source: String,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GooseSummary {
    pub app_id: u16,
    pub length: u16,
    pub reserved1: u16,
    pub reserved2: u16,
    pub payload: Vec<u8>,
}

/// Summarise one decoded packet.
pub fn inspect(
    registry: &LayerRegistry,
    index: u64,
    ts: Option<f64>,
    packet: &Packet<'_>,
) -> PacketSummary {
    let link = match packet.ethernet() {
        Some(eth) => Some(LinkSummary {
            source: format_mac(&eth.source),
            destination: format_mac(&eth.destination),
        }),
        None => {
            log::trace!("packet {index}: Ethernet layer not found");
            None
        }
    };

    let goose = match packet.goose() {
        Some(layer) => Some(GooseSummary {
            app_id: layer.app_id,
            length: layer.length,
            reserved1: layer.reserved1,
            reserved2: layer.reserved2,
            payload: layer.payload_to_vec(),
        }),
        None => {
            log::trace!("packet {index}: GOOSE layer not found");
            None
        }
    };

    PacketSummary {
        index,
        timestamp: ts_to_rfc3339(ts),
        link,
        goose,
        layers: packet.layer_names(registry),
        decode_failure: packet
            .decode_failure()
            .map(|failure| failure.reason.to_string()),
    }
}

impl PacketSummary {
    /// Human-readable lines: addressing, GOOSE fields, then one line per
    /// layer.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(link) = &self.link {
            lines.push(format!("{} >> {}", link.source, link.destination));
        }
        if let Some(goose) = &self.goose {
            lines.push("Packet was successfully decoded with GOOSE layer decoder.".to_string());
            lines.push(format!("Payload: {}", format_hex(&goose.payload)));
            lines.push(format!("AppID: {} (0x{:04x})", goose.app_id, goose.app_id));
            lines.push(format!("Length: {}", goose.length));
        }
        for name in &self.layers {
            lines.push(format!("- {name}"));
        }
        lines
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
