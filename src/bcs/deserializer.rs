//! BCS deserializer

use super::{CodecError, CodecResult};

/// Cursor over an input buffer
#[derive(Debug, Clone)]
pub struct Deserializer<'a> {
    input: &'a [u8],
    offset: usize,
}

impl<'a> Deserializer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, offset: 0 }
    }

    /// Current read position
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.input.len() - self.offset
    }

    /// Assert exact consumption of the input
    pub fn finish(&self) -> CodecResult<()> {
        match self.remaining() {
            0 => Ok(()),
            count => Err(CodecError::TrailingBytes {
                offset: self.offset,
                count,
            }),
        }
    }

    fn take(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(CodecError::TruncatedInput {
                offset: self.offset,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.input[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn deserialize_u8(&mut self) -> CodecResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn deserialize_u16(&mut self) -> CodecResult<u16> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn deserialize_u32(&mut self) -> CodecResult<u32> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn deserialize_u64(&mut self) -> CodecResult<u64> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    pub fn deserialize_u128(&mut self) -> CodecResult<u128> {
        Ok(u128::from_le_bytes(self.take_array()?))
    }

    pub fn deserialize_bool(&mut self) -> CodecResult<bool> {
        match self.deserialize_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBool(other)),
        }
    }

    /// ULEB128 limited to u32, minimal encoding only
    pub fn deserialize_uleb128_as_u32(&mut self) -> CodecResult<u32> {
        let start = self.offset;
        let mut value: u64 = 0;
        let mut shift = 0u32;

        loop {
            let byte = self.deserialize_u8()?;
            let digit = (byte & 0x7f) as u64;
            value |= digit << shift;

            if value > u32::MAX as u64 {
                return Err(CodecError::LengthOverflow);
            }
            if byte & 0x80 == 0 {
                // A zero final group after the first byte has a shorter encoding
                if shift > 0 && digit == 0 {
                    return Err(CodecError::NonCanonicalLength { offset: start });
                }
                return Ok(value as u32);
            }

            shift += 7;
            if shift > 28 {
                return Err(CodecError::LengthOverflow);
            }
        }
    }

    /// Sequence length prefix
    pub fn deserialize_len(&mut self) -> CodecResult<usize> {
        Ok(self.deserialize_uleb128_as_u32()? as usize)
    }

    /// Enum variant index
    pub fn deserialize_variant_index(&mut self) -> CodecResult<u32> {
        self.deserialize_uleb128_as_u32()
    }

    /// Length-prefixed byte vector
    pub fn deserialize_bytes(&mut self) -> CodecResult<Vec<u8>> {
        let len = self.deserialize_len()?;
        Ok(self.take(len)?.to_vec())
    }

    /// Exactly `N` raw bytes
    pub fn deserialize_fixed_bytes<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        self.take_array()
    }

    /// Exactly `len` raw bytes, length known only at runtime
    pub fn deserialize_fixed_slice(&mut self, len: usize) -> CodecResult<Vec<u8>> {
        Ok(self.take(len)?.to_vec())
    }

    /// Length-prefixed UTF-8 string
    pub fn deserialize_str(&mut self) -> CodecResult<String> {
        let offset = self.offset;
        let bytes = self.deserialize_bytes()?;
        String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8 { offset })
    }
}
