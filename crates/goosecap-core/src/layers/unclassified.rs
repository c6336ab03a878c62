use crate::decode::DecodeError;

use super::{DecodedLayer, LayerType};

/// Bytes the pipeline could not classify, with the reason.
///
/// Has no header of its own; all of `data` is reported as payload.
#[derive(Debug, Clone)]
pub struct UnclassifiedLayer<'a> {
    pub data: &'a [u8],
    pub reason: DecodeError,
}

impl<'a> DecodedLayer<'a> for UnclassifiedLayer<'a> {
    fn layer_type(&self) -> LayerType {
        LayerType::DECODE_FAILURE
    }

    fn contents(&self) -> &'a [u8] {
        &[]
    }

    fn payload(&self) -> &'a [u8] {
        self.data
    }
}
