//! Move type strings as they appear in module ABIs

use std::fmt;

use super::type_tag::{is_identifier, StructTag, TypeTag};
use super::{TypeTagError, MAX_TYPE_TAG_NESTING};
use crate::types::AccountAddress;

/// Declared parameter type of an ABI function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
    Signer,
    Vector(Box<MoveType>),
    Struct {
        address: AccountAddress,
        module: String,
        name: String,
        type_args: Vec<MoveType>,
    },
    /// Generic parameter such as `T0`
    Generic(String),
    Reference {
        mutable: bool,
        inner: Box<MoveType>,
    },
}

impl MoveType {
    /// Parse an ABI type string (`&signer`, `vector<u8>`, `0x1::object::Object<T0>`)
    pub fn parse(input: &str) -> Result<Self, TypeTagError> {
        let mut parser = TypeParser::new(input);
        let ty = parser.parse_type()?;
        parser.skip_whitespace();
        if !parser.at_end() {
            return Err(parser.error("unexpected trailing characters"));
        }
        Ok(ty)
    }

    /// Strip any reference layers
    pub fn dereferenced(&self) -> &MoveType {
        match self {
            MoveType::Reference { inner, .. } => inner.dereferenced(),
            other => other,
        }
    }

    /// True for `signer`, `&signer` and `&mut signer`
    pub fn is_signer(&self) -> bool {
        matches!(self.dereferenced(), MoveType::Signer)
    }

    /// True when the struct is `address::module::name`, ignoring type arguments
    pub fn is_struct(&self, address: &AccountAddress, module: &str, name: &str) -> bool {
        matches!(
            self,
            MoveType::Struct { address: a, module: m, name: n, .. }
                if a == address && m == module && n == name
        )
    }

    /// Convert to a concrete runtime tag
    ///
    /// Fails for references, generic parameters, and widths outside the
    /// runtime tag set (u16, u32, u256).
    pub fn to_type_tag(&self) -> Result<TypeTag, TypeTagError> {
        let tag = match self {
            MoveType::Bool => TypeTag::Bool,
            MoveType::U8 => TypeTag::U8,
            MoveType::U64 => TypeTag::U64,
            MoveType::U128 => TypeTag::U128,
            MoveType::Address => TypeTag::Address,
            MoveType::Signer => TypeTag::Signer,
            MoveType::Vector(element) => TypeTag::vector(element.to_type_tag()?),
            MoveType::Struct {
                address,
                module,
                name,
                type_args,
            } => {
                let args = type_args
                    .iter()
                    .map(MoveType::to_type_tag)
                    .collect::<Result<Vec<_>, _>>()?;
                TypeTag::Struct(Box::new(StructTag::from_parts(
                    *address,
                    module.clone(),
                    name.clone(),
                    args,
                )))
            }
            other => return Err(TypeTagError::NotRuntimeType(other.to_string())),
        };
        Ok(tag)
    }
}

impl From<&TypeTag> for MoveType {
    fn from(tag: &TypeTag) -> Self {
        match tag {
            TypeTag::Bool => MoveType::Bool,
            TypeTag::U8 => MoveType::U8,
            TypeTag::U64 => MoveType::U64,
            TypeTag::U128 => MoveType::U128,
            TypeTag::Address => MoveType::Address,
            TypeTag::Signer => MoveType::Signer,
            TypeTag::Vector(element) => MoveType::Vector(Box::new(MoveType::from(element.as_ref()))),
            TypeTag::Struct(tag) => MoveType::Struct {
                address: *tag.address(),
                module: tag.module_name().to_string(),
                name: tag.struct_name().to_string(),
                type_args: tag.type_args().iter().map(MoveType::from).collect(),
            },
        }
    }
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveType::Bool => write!(f, "bool"),
            MoveType::U8 => write!(f, "u8"),
            MoveType::U16 => write!(f, "u16"),
            MoveType::U32 => write!(f, "u32"),
            MoveType::U64 => write!(f, "u64"),
            MoveType::U128 => write!(f, "u128"),
            MoveType::U256 => write!(f, "u256"),
            MoveType::Address => write!(f, "address"),
            MoveType::Signer => write!(f, "signer"),
            MoveType::Vector(element) => write!(f, "vector<{}>", element),
            MoveType::Struct {
                address,
                module,
                name,
                type_args,
            } => {
                write!(f, "{}::{}::{}", address.to_short_hex(), module, name)?;
                if !type_args.is_empty() {
                    let args: Vec<String> = type_args.iter().map(|t| t.to_string()).collect();
                    write!(f, "<{}>", args.join(","))?;
                }
                Ok(())
            }
            MoveType::Generic(name) => write!(f, "{}", name),
            MoveType::Reference { mutable: true, inner } => write!(f, "&mut {}", inner),
            MoveType::Reference { mutable: false, inner } => write!(f, "&{}", inner),
        }
    }
}

struct TypeParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> TypeParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0, depth: 0 }
    }

    fn error(&self, reason: &str) -> TypeTagError {
        TypeTagError::Parse {
            input: self.input.to_string(),
            reason: format!("{} at position {}", reason, self.pos),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), TypeTagError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", token)))
        }
    }

    /// Identifier or hex address token
    fn word(&mut self) -> Result<&'a str, TypeTagError> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error("expected identifier"));
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn parse_type(&mut self) -> Result<MoveType, TypeTagError> {
        if self.depth >= MAX_TYPE_TAG_NESTING {
            return Err(self.error(&format!("type nested deeper than {} levels", MAX_TYPE_TAG_NESTING)));
        }
        self.depth += 1;
        let ty = self.parse_unnested();
        self.depth -= 1;
        ty
    }

    fn parse_unnested(&mut self) -> Result<MoveType, TypeTagError> {
        if self.eat("&") {
            let mutable = self.eat_keyword("mut");
            let inner = self.parse_type()?;
            return Ok(MoveType::Reference {
                mutable,
                inner: Box::new(inner),
            });
        }

        let word = self.word()?;
        let ty = match word {
            "bool" => MoveType::Bool,
            "u8" => MoveType::U8,
            "u16" => MoveType::U16,
            "u32" => MoveType::U32,
            "u64" => MoveType::U64,
            "u128" => MoveType::U128,
            "u256" => MoveType::U256,
            "address" => MoveType::Address,
            "signer" => MoveType::Signer,
            "vector" => {
                self.expect("<")?;
                let element = self.parse_type()?;
                self.expect(">")?;
                MoveType::Vector(Box::new(element))
            }
            _ if word.starts_with("0x") => self.parse_struct(word)?,
            _ if is_identifier(word) => MoveType::Generic(word.to_string()),
            _ => return Err(self.error("expected type")),
        };
        Ok(ty)
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let saved = self.pos;
        if self.eat(keyword) {
            let next = self.rest().chars().next();
            if next.is_some_and(|c| c.is_whitespace()) {
                return true;
            }
        }
        self.pos = saved;
        false
    }

    fn parse_struct(&mut self, address: &str) -> Result<MoveType, TypeTagError> {
        let address = AccountAddress::from_hex(address).map_err(|e| self.error(&e.message))?;
        self.expect("::")?;
        let module = self.word()?.to_string();
        self.expect("::")?;
        let name = self.word()?.to_string();
        if !is_identifier(&module) || !is_identifier(&name) {
            return Err(self.error("invalid module or struct name"));
        }

        let mut type_args = Vec::new();
        if self.eat("<") {
            loop {
                type_args.push(self.parse_type()?);
                if self.eat(",") {
                    continue;
                }
                self.expect(">")?;
                break;
            }
        }

        Ok(MoveType::Struct {
            address,
            module,
            name,
            type_args,
        })
    }
}
