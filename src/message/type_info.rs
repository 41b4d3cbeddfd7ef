//! Fully qualified struct identity used as a message tag

use std::fmt;

use crate::bcs::{BcsDeserialize, BcsSerialize, CodecResult, Deserializer, Serializer};
use crate::types::AccountAddress;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    pub account_address: AccountAddress,
    pub module_name: String,
    pub struct_name: String,
}

impl TypeInfo {
    pub fn new(account_address: AccountAddress, module_name: impl Into<String>, struct_name: impl Into<String>) -> Self {
        Self {
            account_address,
            module_name: module_name.into(),
            struct_name: struct_name.into(),
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.account_address.to_short_hex(),
            self.module_name,
            self.struct_name
        )
    }
}

impl BcsSerialize for TypeInfo {
    fn serialize(&self, serializer: &mut Serializer) {
        self.account_address.serialize(serializer);
        serializer.serialize_str(&self.module_name);
        serializer.serialize_str(&self.struct_name);
    }
}

impl BcsDeserialize for TypeInfo {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        Ok(Self {
            account_address: AccountAddress::deserialize(deserializer)?,
            module_name: deserializer.deserialize_str()?,
            struct_name: deserializer.deserialize_str()?,
        })
    }
}
