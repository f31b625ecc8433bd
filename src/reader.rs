//! Bounds checked reads over a raw descriptor buffer.
//!
//! Multi-byte descriptor fields are little-endian (cf §8.1 of USB 2.0).

use crate::{DescriptorError, DescriptorType};

#[derive(Clone, Copy, Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Check the `bLength` / `bDescriptorType` pair opening the buffer.
    /// Only types with a fixed length can pass.
    pub fn expect_header(&self, expected: DescriptorType) -> Result<(), DescriptorError> {
        match (self.buf, expected.fixed_len()) {
            ([b_length, b_descriptor_type, ..], Some(len)) if *b_length == len && *b_descriptor_type == expected as u8 => {
                Ok(())
            }
            _ => Err(DescriptorError::InvalidHeader { expected }),
        }
    }

    pub fn u8_at(&self, at: usize) -> Result<u8, DescriptorError> {
        self.buf.get(at).copied().ok_or(DescriptorError::TruncatedDescriptor { at })
    }

    pub fn u16_at(&self, at: usize) -> Result<u16, DescriptorError> {
        let lo = self.u8_at(at)?;
        let hi = self.u8_at(at + 1)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// The `len` bytes starting at `at`, failing if they are not all present.
    pub fn record(&self, at: usize, len: usize) -> Result<&'a [u8], DescriptorError> {
        at.checked_add(len)
            .and_then(|end| self.buf.get(at..end))
            .ok_or(DescriptorError::TruncatedDescriptor { at })
    }
}
