//! goosecap core library: layered frame decoding for GOOSE captures.
//!
//! Capture sources feed raw frames into a registry-driven decoding pipeline.
//! Each registered decoder claims a header, appends one layer to the packet
//! and names what follows; the pipeline repeats until a decoder marks the
//! rest as opaque payload or nothing is left. The inspector then turns each
//! decoded packet into an owned summary. All I/O is isolated in `source`.
//!
//! Invariants:
//! - The registry is built once and is immutable while decoding.
//! - Every byte of a frame belongs to exactly one layer's header, to the
//!   payload of the last layer, or to padding past a declared length.
//! - Decoded layers borrow from the frame; summaries own their data.
//! - Decode errors are recorded per packet and never stop a capture.
//!
//! # Examples
//! ```no_run
//! use std::ops::ControlFlow;
//! use std::path::Path;
//!
//! use goosecap_core::{default_registry, inspect_pcap_file};
//!
//! let registry = default_registry()?;
//! let stats = inspect_pcap_file(&registry, Path::new("goose.pcap"), |summary| {
//!     for line in summary.render_lines() {
//!         println!("{line}");
//!     }
//!     ControlFlow::Continue(())
//! })?;
//! println!("{} packets", stats.packets_total);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod capture;
pub mod decode;
pub mod inspect;
pub mod layers;
pub mod protocols;
pub mod registry;
mod source;

pub use capture::{CaptureStats, InspectError, inspect_pcap_file, inspect_source};
pub use decode::{DecodeError, NextLayer, Packet, PacketBuilder, decode_frame, decode_packet};
pub use inspect::{GooseSummary, LinkSummary, PacketSummary, inspect};
pub use layers::{DecodedLayer, Layer, LayerType};
pub use registry::{LayerMetadata, LayerRegistry, RegistryBuilder, RegistryError};
pub use source::{Frames, PacketSource, PcapFileSource, RawFrame, SourceError};

/// Registry with the built-in layers and the GOOSE layer.
///
/// # Examples
/// ```
/// use goosecap_core::{LayerType, default_registry};
///
/// let registry = default_registry().unwrap();
/// assert_eq!(registry.name(LayerType(2001)), Some("GOOSE"));
/// assert_eq!(registry.layer_for_ether_type(0x88b8), Some(LayerType(2001)));
/// ```
pub fn default_registry() -> Result<LayerRegistry, RegistryError> {
    let mut builder = RegistryBuilder::new();
    protocols::goose::register(&mut builder)?;
    Ok(builder.build())
}
