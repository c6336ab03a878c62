use std::ops::ControlFlow;
use std::path::Path;

use thiserror::Error;

use crate::decode::decode_frame;
use crate::inspect::{PacketSummary, inspect};
use crate::registry::LayerRegistry;
use crate::source::{PacketSource, PcapFileSource, SourceError};

#[derive(Debug, Error)]
pub enum InspectError {
    /// The capture could not be opened; no packet was visited.
    #[error("Open error: {0}")]
    Open(SourceError),
    /// Reading a frame failed after the capture was opened.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Counters for one pass over a capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    pub packets_total: u64,
    pub goose_packets: u64,
    pub decode_failures: u64,
}

/// Open a PCAP/PCAPNG file and inspect every frame in it.
///
/// # Errors
/// Fails before any packet is visited when the file cannot be opened.
pub fn inspect_pcap_file<F>(
    registry: &LayerRegistry,
    path: &Path,
    visitor: F,
) -> Result<CaptureStats, InspectError>
where
    F: FnMut(&PacketSummary) -> ControlFlow<()>,
{
    let source = PcapFileSource::open(path).map_err(InspectError::Open)?;
    inspect_source(registry, source, visitor)
}

/// Decode and inspect frames one at a time until the source is exhausted or
/// `visitor` breaks.
///
/// The source is dropped (and its handle released) before this returns, on
/// every path.
pub fn inspect_source<S, F>(
    registry: &LayerRegistry,
    source: S,
    mut visitor: F,
) -> Result<CaptureStats, InspectError>
where
    S: PacketSource,
    F: FnMut(&PacketSummary) -> ControlFlow<()>,
{
    let mut stats = CaptureStats::default();

    for frame in source.frames() {
        let frame = frame?;
        let packet = decode_frame(registry, &frame);
        let summary = inspect(registry, stats.packets_total, frame.ts, &packet);

        stats.packets_total += 1;
        if summary.goose.is_some() {
            stats.goose_packets += 1;
        }
        if summary.decode_failure.is_some() {
            stats.decode_failures += 1;
        }

        if visitor(&summary).is_break() {
            log::debug!("stopped after {} packets", stats.packets_total);
            break;
        }
    }

    log::info!(
        "inspected {} packets ({} GOOSE, {} decode failures)",
        stats.packets_total,
        stats.goose_packets,
        stats.decode_failures
    );
    Ok(stats)
}
