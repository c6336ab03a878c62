use thiserror::Error;

use crate::layers::LayerType;
use crate::protocols::goose::error::GooseError;

/// Why a run of bytes could not be classified.
///
/// Decode errors are local to one packet: the pipeline records them in an
/// `Unclassified` layer and moves on to the next frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Goose(#[from] GooseError),
    #[error("truncated {layer} header: need {needed} bytes, got {actual}")]
    TruncatedHeader {
        layer: &'static str,
        needed: usize,
        actual: usize,
    },
    #[error("{layer} slice error: {message}")]
    Slice {
        layer: &'static str,
        message: String,
    },
    #[error("no decoder registered for {0}")]
    UnknownLayerType(LayerType),
    #[error("unsupported link type {0}")]
    UnsupportedLinktype(i32),
    #[error("{0} decoder made no progress")]
    NoProgress(LayerType),
    #[error("bytes left undecoded")]
    Opaque,
}

impl DecodeError {
    pub(crate) fn slice(layer: &'static str, err: impl std::fmt::Display) -> Self {
        DecodeError::Slice {
            layer,
            message: err.to_string(),
        }
    }
}
