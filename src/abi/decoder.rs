//! ABI-guided argument decoder

use serde_json::{json, Value};

use super::types::FunctionSignature;
use super::AbiError;
use crate::bcs::{CodecError, Deserializer};
use crate::move_types::{MoveType, TypeTag};
use crate::transaction::EntryFunctionCall;
use crate::types::AccountAddress;

/// A decoded leaf value, before wallet-specific formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Address(AccountAddress),
    /// Contents of a `vector<u8>`
    Bytes(Vec<u8>),
    /// Contents of a `0x1::string::String`
    String(String),
}

impl Primitive {
    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::Bool(_) => "bool",
            Primitive::U8(_) => "u8",
            Primitive::U16(_) => "u16",
            Primitive::U32(_) => "u32",
            Primitive::U64(_) => "u64",
            Primitive::U128(_) => "u128",
            Primitive::Address(_) => "address",
            Primitive::Bytes(_) => "vector<u8>",
            Primitive::String(_) => "0x1::string::String",
        }
    }
}

/// Formatted argument value handed to the signing request builder
pub type DecodedArgument = Value;

/// Per-wallet textual representation of decoded primitives
pub trait ArgFormatter: Send + Sync {
    fn format(&self, value: Primitive) -> Value;
}

/// Entry-function JSON form expected by browser wallets
///
/// Addresses as full hex, every integer as a decimal string, byte vectors
/// passed through as a plain byte array.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringifyFormatter;

impl ArgFormatter for StringifyFormatter {
    fn format(&self, value: Primitive) -> Value {
        match value {
            Primitive::Bool(v) => Value::Bool(v),
            Primitive::U8(v) => Value::String(v.to_string()),
            Primitive::U16(v) => Value::String(v.to_string()),
            Primitive::U32(v) => Value::String(v.to_string()),
            Primitive::U64(v) => Value::String(v.to_string()),
            Primitive::U128(v) => Value::String(v.to_string()),
            Primitive::Address(v) => Value::String(v.to_hex()),
            Primitive::Bytes(v) => json!(v),
            Primitive::String(v) => Value::String(v),
        }
    }
}

/// Human-oriented JSON for inspection output
///
/// Small integers stay numbers, u64/u128 become strings, bytes become 0x hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFormatter;

impl ArgFormatter for NativeFormatter {
    fn format(&self, value: Primitive) -> Value {
        match value {
            Primitive::Bool(v) => Value::Bool(v),
            Primitive::U8(v) => json!(v),
            Primitive::U16(v) => json!(v),
            Primitive::U32(v) => json!(v),
            Primitive::U64(v) => Value::String(v.to_string()),
            Primitive::U128(v) => Value::String(v.to_string()),
            Primitive::Address(v) => Value::String(v.to_short_hex()),
            Primitive::Bytes(v) => Value::String(format!("0x{}", hex::encode(v))),
            Primitive::String(v) => Value::String(v),
        }
    }
}

pub struct ArgumentDecoder<'a> {
    formatter: &'a dyn ArgFormatter,
}

impl<'a> ArgumentDecoder<'a> {
    pub fn new(formatter: &'a dyn ArgFormatter) -> Self {
        Self { formatter }
    }

    /// Decode every argument of `call` against `signature`
    ///
    /// The call must supply exactly the declared number of type arguments and
    /// one encoded argument per non-signer parameter.
    pub fn decode_call(
        &self,
        call: &EntryFunctionCall,
        signature: &FunctionSignature,
    ) -> Result<Vec<DecodedArgument>, AbiError> {
        let function = call.function_tag();
        if call.type_args.len() != signature.generic_type_params {
            return Err(AbiError::WrongTypeArgCount {
                function,
                expected: signature.generic_type_params,
                actual: call.type_args.len(),
            });
        }

        let arg_types = signature.argument_types();
        if arg_types.len() != call.args.len() {
            return Err(AbiError::ArgumentCountMismatch {
                function,
                expected: arg_types.len(),
                actual: call.args.len(),
            });
        }

        arg_types
            .iter()
            .zip(&call.args)
            .enumerate()
            .map(|(index, (ty, bytes))| {
                self.decode_argument(bytes, ty, &call.type_args)
                    .map_err(|source| AbiError::ArgumentDecode {
                        function: function.clone(),
                        index,
                        declared_type: ty.to_string(),
                        source,
                    })
            })
            .collect()
    }

    /// Decode one argument encoding; every byte must be consumed
    pub fn decode_argument(
        &self,
        bytes: &[u8],
        ty: &MoveType,
        type_args: &[TypeTag],
    ) -> Result<DecodedArgument, CodecError> {
        let mut deserializer = Deserializer::new(bytes);
        let value = self.decode_value(&mut deserializer, ty, type_args)?;
        deserializer.finish()?;
        Ok(value)
    }

    fn decode_value(
        &self,
        deserializer: &mut Deserializer<'_>,
        ty: &MoveType,
        type_args: &[TypeTag],
    ) -> Result<Value, CodecError> {
        let primitive = match ty {
            MoveType::Bool => Primitive::Bool(deserializer.deserialize_bool()?),
            MoveType::U8 => Primitive::U8(deserializer.deserialize_u8()?),
            MoveType::U16 => Primitive::U16(deserializer.deserialize_u16()?),
            MoveType::U32 => Primitive::U32(deserializer.deserialize_u32()?),
            MoveType::U64 => Primitive::U64(deserializer.deserialize_u64()?),
            MoveType::U128 => Primitive::U128(deserializer.deserialize_u128()?),
            MoveType::Address => Primitive::Address(AccountAddress::new(deserializer.deserialize_fixed_bytes()?)),
            MoveType::Vector(element) if is_byte_element(element, type_args) => {
                Primitive::Bytes(deserializer.deserialize_bytes()?)
            }
            MoveType::Vector(element) => {
                let len = deserializer.deserialize_len()?;
                let mut items = Vec::with_capacity(len.min(deserializer.remaining()));
                for _ in 0..len {
                    items.push(self.decode_value(deserializer, element, type_args)?);
                }
                return Ok(Value::Array(items));
            }
            MoveType::Struct { .. } if is_framework_struct(ty, "string", "String") => {
                Primitive::String(deserializer.deserialize_str()?)
            }
            MoveType::Struct { .. } if is_framework_struct(ty, "object", "Object") => {
                Primitive::Address(AccountAddress::new(deserializer.deserialize_fixed_bytes()?))
            }
            MoveType::Struct { type_args: inner, .. } if is_framework_struct(ty, "option", "Option") => {
                let element = match inner.as_slice() {
                    [element] => element,
                    _ => return Err(CodecError::UnknownArgumentType(ty.to_string())),
                };
                let len = deserializer.deserialize_len()?;
                if len > 1 {
                    return Err(CodecError::InvalidValue(format!("option with {} elements", len)));
                }
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(self.decode_value(deserializer, element, type_args)?);
                }
                return Ok(Value::Array(items));
            }
            MoveType::Generic(name) => {
                let resolved = resolve_generic(name, type_args)
                    .ok_or_else(|| CodecError::UnknownArgumentType(ty.to_string()))?;
                return self.decode_value(deserializer, &resolved, type_args);
            }
            other => return Err(CodecError::UnknownArgumentType(other.to_string())),
        };
        Ok(self.formatter.format(primitive))
    }
}

fn is_framework_struct(ty: &MoveType, module: &str, name: &str) -> bool {
    ty.is_struct(&AccountAddress::one(), module, name)
}

/// `vector<u8>` is an opaque blob, including when the element is a generic bound to `u8`
fn is_byte_element(element: &MoveType, type_args: &[TypeTag]) -> bool {
    match element {
        MoveType::U8 => true,
        MoveType::Generic(name) => resolve_generic(name, type_args) == Some(MoveType::U8),
        _ => false,
    }
}

/// `T<n>` refers to the call's n-th type argument
fn resolve_generic(name: &str, type_args: &[TypeTag]) -> Option<MoveType> {
    let index: usize = name.strip_prefix('T')?.parse().ok()?;
    type_args.get(index).map(MoveType::from)
}
