//! BCS serializer

/// Append-only canonical encoder
#[derive(Debug, Default, Clone)]
pub struct Serializer {
    output: Vec<u8>,
}

impl Serializer {
    pub fn new() -> Self {
        Self { output: Vec::new() }
    }

    /// Consume the serializer and return the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.output
    }

    /// Bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.output
    }

    pub fn serialize_u8(&mut self, value: u8) {
        self.output.push(value);
    }

    pub fn serialize_u16(&mut self, value: u16) {
        self.output.extend_from_slice(&value.to_le_bytes());
    }

    pub fn serialize_u32(&mut self, value: u32) {
        self.output.extend_from_slice(&value.to_le_bytes());
    }

    pub fn serialize_u64(&mut self, value: u64) {
        self.output.extend_from_slice(&value.to_le_bytes());
    }

    pub fn serialize_u128(&mut self, value: u128) {
        self.output.extend_from_slice(&value.to_le_bytes());
    }

    pub fn serialize_bool(&mut self, value: bool) {
        self.output.push(value as u8);
    }

    /// ULEB128: 7 bits per byte, least significant group first,
    /// high bit set on every byte except the last
    pub fn serialize_uleb128(&mut self, mut value: u32) {
        while value >= 0x80 {
            self.output.push((value as u8 & 0x7f) | 0x80);
            value >>= 7;
        }
        self.output.push(value as u8);
    }

    /// Sequence length prefix
    ///
    /// Lengths beyond `u32::MAX` cannot be represented on chain; callers
    /// never build such values, so the length is saturated rather than wrapped.
    pub fn serialize_len(&mut self, len: usize) {
        self.serialize_uleb128(u32::try_from(len).unwrap_or(u32::MAX));
    }

    /// Enum variant index
    pub fn serialize_variant_index(&mut self, index: u32) {
        self.serialize_uleb128(index);
    }

    /// Length-prefixed byte vector
    pub fn serialize_bytes(&mut self, bytes: &[u8]) {
        self.serialize_len(bytes.len());
        self.output.extend_from_slice(bytes);
    }

    /// Raw bytes with no length prefix (fixed-size arrays)
    pub fn serialize_fixed_bytes(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }

    /// Length-prefixed UTF-8 string
    pub fn serialize_str(&mut self, value: &str) {
        self.serialize_bytes(value.as_bytes());
    }
}
