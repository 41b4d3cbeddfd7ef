//! Serde helpers for byte arrays
//!
//! Fixed-size arrays and raw byte vectors are rendered as 0x-prefixed hex in
//! JSON. Input is accepted with or without the prefix.

use serde::{Deserialize, Deserializer, Serializer};

fn decode_str<E: serde::de::Error>(s: &str) -> Result<Vec<u8>, E> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(stripped).map_err(E::custom)
}

fn encode_str(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Serialize/deserialize [u8; 32] as hex string
pub mod hex32 {
    use super::*;

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode_str(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        decode_str::<D::Error>(&s)?
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 32 bytes"))
    }
}

/// Serialize/deserialize [u8; 64] as hex string
pub mod hex64 {
    use super::*;

    pub fn serialize<S>(bytes: &[u8; 64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode_str(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 64], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        decode_str::<D::Error>(&s)?
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 64 bytes"))
    }
}

/// Serialize/deserialize Vec<u8> as hex string
pub mod hex_vec {
    use super::*;

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode_str(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        decode_str::<D::Error>(&s)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Sample {
        #[serde(with = "super::hex32")]
        key: [u8; 32],
        #[serde(with = "super::hex_vec")]
        blob: Vec<u8>,
    }

    #[test]
    fn test_prefix_optional_on_input() {
        let json = format!(r#"{{"key":"{}","blob":"0a0b"}}"#, "11".repeat(32));
        let sample: Sample = serde_json::from_str(&json).unwrap();
        assert_eq!(sample.key, [0x11; 32]);
        assert_eq!(sample.blob, vec![0x0a, 0x0b]);

        let out = serde_json::to_string(&sample).unwrap();
        assert!(out.contains("\"blob\":\"0x0a0b\""));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let json = r#"{"key":"0x1122","blob":""}"#;
        assert!(serde_json::from_str::<Sample>(json).is_err());
    }
}
