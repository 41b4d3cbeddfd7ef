//! Move type model
//!
//! Two related representations:
//! - [`TypeTag`]: the runtime type of an on-chain value, always concrete
//!   (primitive, vector, or fully instantiated struct). This is what entry
//!   function payloads carry as type arguments.
//! - [`MoveType`]: a declared parameter type as published in a module ABI.
//!   It may mention references (`&signer`), generic parameters (`T0`) and
//!   integer widths the runtime tag set does not carry.
//!
//! Both parse from and render to Move type strings such as
//! `0x1::coin::Coin<0x1::aptos_coin::AptosCoin>`.

pub mod type_tag;
pub mod parser;


pub use type_tag::*;
pub use parser::*;

/// Deepest type nesting accepted from untrusted input (`vector<vector<u8>>` is 3 levels)
pub const MAX_TYPE_TAG_NESTING: usize = 8;

/// Error types for type construction and parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeTagError {
    #[error("wrong number of type arguments for {name}: expected {expected}, got {actual}")]
    WrongTypeArgCount {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid type string '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("type '{0}' has no runtime type tag")]
    NotRuntimeType(String),
}
