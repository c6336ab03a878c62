//! Capture sources.
//!
//! A source yields raw frames one at a time, in capture order. Sources own
//! their underlying handle and release it when dropped, so abandoning a
//! [`Frames`] iterator half-way still closes the capture.

mod pcap;

pub use pcap::PcapFileSource;

use pcap_parser::Linktype;
use thiserror::Error;

/// One captured frame, owned by the caller for as long as its decoded
/// packet is in use.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Capture timestamp in seconds since the Unix epoch, when known.
    pub ts: Option<f64>,
    /// Link type announced by the capture for this frame's interface.
    pub linktype: Linktype,
    pub data: Vec<u8>,
}

pub trait PacketSource {
    /// Returns the next frame, or `Ok(None)` once the source is exhausted.
    fn next_packet(&mut self) -> Result<Option<RawFrame>, SourceError>;

    /// Consumes the source into a lazy iterator of frames.
    fn frames(self) -> Frames<Self>
    where
        Self: Sized,
    {
        Frames {
            source: self,
            finished: false,
        }
    }
}

/// Lazy, finite iterator over the frames of a [`PacketSource`].
///
/// Ends with `None` at exhaustion. After the first error the iterator is
/// fused and yields `None`.
pub struct Frames<S> {
    source: S,
    finished: bool,
}

impl<S: PacketSource> Iterator for Frames<S> {
    type Item = Result<RawFrame, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.source.next_packet() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PCAP parse error: {0}")]
    Pcap(String),
}

impl From<pcap::error::PcapSourceError> for SourceError {
    fn from(value: pcap::error::PcapSourceError) -> Self {
        match value {
            pcap::error::PcapSourceError::Io(err) => SourceError::Io(err),
            pcap::error::PcapSourceError::Pcap { context, message } => {
                SourceError::Pcap(format!("{context}: {message}"))
            }
        }
    }
}
