use super::error::GooseError;
use super::layout;

pub struct GooseReader<'a> {
    data: &'a [u8],
}

impl<'a> GooseReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), GooseError> {
        if self.data.len() < needed {
            return Err(GooseError::TruncatedHeader {
                needed,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], GooseError> {
        self.data
            .get(range.clone())
            .ok_or(GooseError::TruncatedHeader {
                needed: range.end,
                actual: self.data.len(),
            })
    }

    pub fn read_u16_le(&self, range: std::ops::Range<usize>) -> Result<u16, GooseError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(GooseError::TruncatedHeader {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn header(&self) -> Result<&'a [u8], GooseError> {
        self.read_slice(0..layout::HEADER_LEN)
    }

    pub fn payload(&self) -> Result<&'a [u8], GooseError> {
        self.require_len(layout::PAYLOAD_OFFSET)?;
        self.read_slice(layout::PAYLOAD_OFFSET..self.data.len())
    }
}
