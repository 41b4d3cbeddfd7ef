//! Transaction payload variants

use std::fmt;

use super::PayloadError;
use crate::bcs::{BcsDeserialize, BcsSerialize, CodecError, CodecResult, Deserializer, Serializer};
use crate::move_types::TypeTag;
use crate::types::AccountAddress;

/// Published module identity, `address::name`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleId {
    pub address: AccountAddress,
    pub name: String,
}

impl ModuleId {
    pub fn new(address: AccountAddress, name: impl Into<String>) -> Self {
        Self {
            address,
            name: name.into(),
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.address.to_short_hex(), self.name)
    }
}

impl BcsSerialize for ModuleId {
    fn serialize(&self, serializer: &mut Serializer) {
        self.address.serialize(serializer);
        serializer.serialize_str(&self.name);
    }
}

impl BcsDeserialize for ModuleId {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        Ok(Self {
            address: AccountAddress::deserialize(deserializer)?,
            name: deserializer.deserialize_str()?,
        })
    }
}

/// Call of a public entry function
///
/// `args` holds each argument's own canonical encoding, opaque until decoded
/// against the function's ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFunctionCall {
    pub module: ModuleId,
    pub function: String,
    pub type_args: Vec<TypeTag>,
    pub args: Vec<Vec<u8>>,
}

impl EntryFunctionCall {
    pub fn new(module: ModuleId, function: impl Into<String>, type_args: Vec<TypeTag>, args: Vec<Vec<u8>>) -> Self {
        Self {
            module,
            function: function.into(),
            type_args,
            args,
        }
    }

    /// `0x1::coin::transfer`
    pub fn function_tag(&self) -> String {
        format!("{}::{}", self.module, self.function)
    }
}

impl BcsSerialize for EntryFunctionCall {
    fn serialize(&self, serializer: &mut Serializer) {
        self.module.serialize(serializer);
        serializer.serialize_str(&self.function);
        self.type_args.serialize(serializer);
        serializer.serialize_len(self.args.len());
        for arg in &self.args {
            serializer.serialize_bytes(arg);
        }
    }
}

impl BcsDeserialize for EntryFunctionCall {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        let module = ModuleId::deserialize(deserializer)?;
        let function = deserializer.deserialize_str()?;
        let type_args = Vec::<TypeTag>::deserialize(deserializer)?;
        let count = deserializer.deserialize_len()?;
        let mut args = Vec::with_capacity(count.min(deserializer.remaining()));
        for _ in 0..count {
            args.push(deserializer.deserialize_bytes()?);
        }
        Ok(Self {
            module,
            function,
            type_args,
            args,
        })
    }
}

/// Script argument; scripts carry typed values rather than opaque bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionArgument {
    U8(u8),
    U64(u64),
    U128(u128),
    Address(AccountAddress),
    U8Vector(Vec<u8>),
    Bool(bool),
}

impl BcsSerialize for TransactionArgument {
    fn serialize(&self, serializer: &mut Serializer) {
        match self {
            TransactionArgument::U8(v) => {
                serializer.serialize_variant_index(0);
                serializer.serialize_u8(*v);
            }
            TransactionArgument::U64(v) => {
                serializer.serialize_variant_index(1);
                serializer.serialize_u64(*v);
            }
            TransactionArgument::U128(v) => {
                serializer.serialize_variant_index(2);
                serializer.serialize_u128(*v);
            }
            TransactionArgument::Address(v) => {
                serializer.serialize_variant_index(3);
                v.serialize(serializer);
            }
            TransactionArgument::U8Vector(v) => {
                serializer.serialize_variant_index(4);
                serializer.serialize_bytes(v);
            }
            TransactionArgument::Bool(v) => {
                serializer.serialize_variant_index(5);
                serializer.serialize_bool(*v);
            }
        }
    }
}

impl BcsDeserialize for TransactionArgument {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        let arg = match deserializer.deserialize_variant_index()? {
            0 => TransactionArgument::U8(deserializer.deserialize_u8()?),
            1 => TransactionArgument::U64(deserializer.deserialize_u64()?),
            2 => TransactionArgument::U128(deserializer.deserialize_u128()?),
            3 => TransactionArgument::Address(AccountAddress::deserialize(deserializer)?),
            4 => TransactionArgument::U8Vector(deserializer.deserialize_bytes()?),
            5 => TransactionArgument::Bool(deserializer.deserialize_bool()?),
            index => {
                return Err(CodecError::InvalidVariant {
                    type_name: "TransactionArgument",
                    index,
                })
            }
        };
        Ok(arg)
    }
}

/// Compiled script with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub code: Vec<u8>,
    pub type_args: Vec<TypeTag>,
    pub args: Vec<TransactionArgument>,
}

impl BcsSerialize for Script {
    fn serialize(&self, serializer: &mut Serializer) {
        serializer.serialize_bytes(&self.code);
        self.type_args.serialize(serializer);
        self.args.serialize(serializer);
    }
}

impl BcsDeserialize for Script {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        Ok(Self {
            code: deserializer.deserialize_bytes()?,
            type_args: Vec::<TypeTag>::deserialize(deserializer)?,
            args: Vec::<TransactionArgument>::deserialize(deserializer)?,
        })
    }
}

/// Module bytecode for publishing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub code: Vec<u8>,
}

impl BcsSerialize for Module {
    fn serialize(&self, serializer: &mut Serializer) {
        serializer.serialize_bytes(&self.code);
    }
}

impl BcsDeserialize for Module {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        Ok(Self {
            code: deserializer.deserialize_bytes()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionPayload {
    Script(Script),
    ModuleBundle(Vec<Module>),
    EntryFunction(EntryFunctionCall),
}

impl TransactionPayload {
    const SCRIPT: u32 = 0;
    const MODULE_BUNDLE: u32 = 1;
    const ENTRY_FUNCTION: u32 = 2;

    pub fn kind(&self) -> &'static str {
        match self {
            TransactionPayload::Script(_) => "script",
            TransactionPayload::ModuleBundle(_) => "module_bundle",
            TransactionPayload::EntryFunction(_) => "entry_function",
        }
    }

    /// The entry function call, or `UnsupportedPayloadType` for scripts and module bundles
    pub fn as_entry_function(&self) -> Result<&EntryFunctionCall, PayloadError> {
        match self {
            TransactionPayload::EntryFunction(call) => Ok(call),
            other => Err(PayloadError::UnsupportedPayloadType(other.kind())),
        }
    }
}

impl BcsSerialize for TransactionPayload {
    fn serialize(&self, serializer: &mut Serializer) {
        match self {
            TransactionPayload::Script(script) => {
                serializer.serialize_variant_index(Self::SCRIPT);
                script.serialize(serializer);
            }
            TransactionPayload::ModuleBundle(modules) => {
                serializer.serialize_variant_index(Self::MODULE_BUNDLE);
                modules.serialize(serializer);
            }
            TransactionPayload::EntryFunction(call) => {
                serializer.serialize_variant_index(Self::ENTRY_FUNCTION);
                call.serialize(serializer);
            }
        }
    }
}

impl BcsDeserialize for TransactionPayload {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        let payload = match deserializer.deserialize_variant_index()? {
            Self::SCRIPT => TransactionPayload::Script(Script::deserialize(deserializer)?),
            Self::MODULE_BUNDLE => TransactionPayload::ModuleBundle(Vec::<Module>::deserialize(deserializer)?),
            Self::ENTRY_FUNCTION => TransactionPayload::EntryFunction(EntryFunctionCall::deserialize(deserializer)?),
            index => {
                return Err(CodecError::InvalidVariant {
                    type_name: "TransactionPayload",
                    index,
                })
            }
        };
        Ok(payload)
    }
}
