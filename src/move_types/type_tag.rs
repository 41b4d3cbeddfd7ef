//! Runtime type tags

use std::fmt;
use std::str::FromStr;

use super::parser::MoveType;
use super::{TypeTagError, MAX_TYPE_TAG_NESTING};
use crate::bcs::{BcsDeserialize, BcsSerialize, CodecError, CodecResult, Deserializer, Serializer};
use crate::types::AccountAddress;

/// Concrete on-chain type of a value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
}

impl TypeTag {
    const TAG_BOOL: u32 = 0;
    const TAG_U8: u32 = 1;
    const TAG_U64: u32 = 2;
    const TAG_U128: u32 = 3;
    const TAG_ADDRESS: u32 = 4;
    const TAG_SIGNER: u32 = 5;
    const TAG_VECTOR: u32 = 6;
    const TAG_STRUCT: u32 = 7;

    pub fn vector(element: TypeTag) -> Self {
        TypeTag::Vector(Box::new(element))
    }

    /// `0x1::aptos_coin::AptosCoin`
    pub fn aptos_coin() -> Self {
        TypeTag::Struct(Box::new(StructTag::new(AccountAddress::one(), "aptos_coin", "AptosCoin")))
    }

    fn variant_index(&self) -> u32 {
        match self {
            TypeTag::Bool => Self::TAG_BOOL,
            TypeTag::U8 => Self::TAG_U8,
            TypeTag::U64 => Self::TAG_U64,
            TypeTag::U128 => Self::TAG_U128,
            TypeTag::Address => Self::TAG_ADDRESS,
            TypeTag::Signer => Self::TAG_SIGNER,
            TypeTag::Vector(_) => Self::TAG_VECTOR,
            TypeTag::Struct(_) => Self::TAG_STRUCT,
        }
    }

    /// Decode a tag found `depth` levels deep (the outermost tag is depth 1)
    fn deserialize_nested(deserializer: &mut Deserializer<'_>, depth: usize) -> CodecResult<Self> {
        if depth > MAX_TYPE_TAG_NESTING {
            return Err(CodecError::InvalidValue(format!(
                "type tag nested deeper than {} levels",
                MAX_TYPE_TAG_NESTING
            )));
        }

        let tag = match deserializer.deserialize_variant_index()? {
            Self::TAG_BOOL => TypeTag::Bool,
            Self::TAG_U8 => TypeTag::U8,
            Self::TAG_U64 => TypeTag::U64,
            Self::TAG_U128 => TypeTag::U128,
            Self::TAG_ADDRESS => TypeTag::Address,
            Self::TAG_SIGNER => TypeTag::Signer,
            Self::TAG_VECTOR => TypeTag::vector(Self::deserialize_nested(deserializer, depth + 1)?),
            Self::TAG_STRUCT => TypeTag::Struct(Box::new(StructTag::deserialize_nested(deserializer, depth)?)),
            index => {
                return Err(CodecError::InvalidVariant {
                    type_name: "TypeTag",
                    index,
                })
            }
        };
        Ok(tag)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(element) => write!(f, "vector<{}>", element),
            TypeTag::Struct(tag) => write!(f, "{}", tag),
        }
    }
}

impl FromStr for TypeTag {
    type Err = TypeTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoveType::parse(s)?.to_type_tag()
    }
}

impl BcsSerialize for TypeTag {
    fn serialize(&self, serializer: &mut Serializer) {
        serializer.serialize_variant_index(self.variant_index());
        match self {
            TypeTag::Vector(element) => element.serialize(serializer),
            TypeTag::Struct(tag) => tag.serialize(serializer),
            _ => {}
        }
    }
}

impl BcsDeserialize for TypeTag {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        Self::deserialize_nested(deserializer, 1)
    }
}

/// Fully qualified, fully instantiated struct type
///
/// Fields are private: a struct tag is either non-generic ([`StructTag::new`]),
/// instantiated from a [`StructDeclaration`] with a checked arity, or decoded
/// from an encoding that carries its own type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructTag {
    address: AccountAddress,
    module_name: String,
    struct_name: String,
    type_args: Vec<TypeTag>,
}

impl StructTag {
    /// Non-generic struct
    pub fn new(address: AccountAddress, module_name: impl Into<String>, struct_name: impl Into<String>) -> Self {
        Self {
            address,
            module_name: module_name.into(),
            struct_name: struct_name.into(),
            type_args: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        address: AccountAddress,
        module_name: String,
        struct_name: String,
        type_args: Vec<TypeTag>,
    ) -> Self {
        Self {
            address,
            module_name,
            struct_name,
            type_args,
        }
    }

    pub fn address(&self) -> &AccountAddress {
        &self.address
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn struct_name(&self) -> &str {
        &self.struct_name
    }

    pub fn type_args(&self) -> &[TypeTag] {
        &self.type_args
    }

    /// `address::module::Name` without type arguments
    pub fn qualified_name(&self) -> String {
        format!("{}::{}::{}", self.address.to_short_hex(), self.module_name, self.struct_name)
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())?;
        if !self.type_args.is_empty() {
            let args: Vec<String> = self.type_args.iter().map(|t| t.to_string()).collect();
            write!(f, "<{}>", args.join(","))?;
        }
        Ok(())
    }
}

impl BcsSerialize for StructTag {
    fn serialize(&self, serializer: &mut Serializer) {
        self.address.serialize(serializer);
        serializer.serialize_str(&self.module_name);
        serializer.serialize_str(&self.struct_name);
        self.type_args.serialize(serializer);
    }
}

impl StructTag {
    /// Decode a struct tag whose own tag sits at `depth`; type arguments are one level deeper
    fn deserialize_nested(deserializer: &mut Deserializer<'_>, depth: usize) -> CodecResult<Self> {
        let address = AccountAddress::deserialize(deserializer)?;
        let module_name = deserializer.deserialize_str()?;
        let struct_name = deserializer.deserialize_str()?;

        let len = deserializer.deserialize_len()?;
        let mut type_args = Vec::with_capacity(len.min(deserializer.remaining()));
        for _ in 0..len {
            type_args.push(TypeTag::deserialize_nested(deserializer, depth + 1)?);
        }

        Ok(Self {
            address,
            module_name,
            struct_name,
            type_args,
        })
    }
}

impl BcsDeserialize for StructTag {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        Self::deserialize_nested(deserializer, 1)
    }
}

/// A struct as declared, with its generic parameter list
///
/// `StructDeclaration::new(addr, "coin", "Coin<T>")` declares arity 1; it only
/// becomes a [`StructTag`] once given exactly that many type arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDeclaration {
    address: AccountAddress,
    module_name: String,
    struct_name: String,
    generic_params: Vec<String>,
}

impl StructDeclaration {
    pub fn new(
        address: AccountAddress,
        module_name: impl Into<String>,
        declared_name: &str,
    ) -> Result<Self, TypeTagError> {
        let declared_name = declared_name.trim();
        let (struct_name, generic_params) = match declared_name.find('<') {
            Some(open) => {
                let params = declared_name[open + 1..]
                    .strip_suffix('>')
                    .ok_or_else(|| TypeTagError::Parse {
                        input: declared_name.to_string(),
                        reason: "unterminated generic parameter list".to_string(),
                    })?;
                let params: Vec<String> = params.split(',').map(|p| p.trim().to_string()).collect();
                if params.iter().any(|p| !is_identifier(p)) {
                    return Err(TypeTagError::Parse {
                        input: declared_name.to_string(),
                        reason: "generic parameters must be identifiers".to_string(),
                    });
                }
                (declared_name[..open].to_string(), params)
            }
            None => (declared_name.to_string(), Vec::new()),
        };

        if !is_identifier(&struct_name) {
            return Err(TypeTagError::Parse {
                input: declared_name.to_string(),
                reason: "struct name must be an identifier".to_string(),
            });
        }

        Ok(Self {
            address,
            module_name: module_name.into(),
            struct_name,
            generic_params,
        })
    }

    /// Number of declared generic parameters
    pub fn arity(&self) -> usize {
        self.generic_params.len()
    }

    /// Bind type arguments; the count must equal the declared arity
    pub fn instantiate(&self, type_args: Vec<TypeTag>) -> Result<StructTag, TypeTagError> {
        if type_args.len() != self.arity() {
            return Err(TypeTagError::WrongTypeArgCount {
                name: format!("{}::{}::{}", self.address.to_short_hex(), self.module_name, self.struct_name),
                expected: self.arity(),
                actual: type_args.len(),
            });
        }
        Ok(StructTag::from_parts(
            self.address,
            self.module_name.clone(),
            self.struct_name.clone(),
            type_args,
        ))
    }
}

pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
