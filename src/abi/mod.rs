//! Module ABIs and ABI-guided argument decoding
//!
//! Entry function arguments travel as opaque per-argument encodings. To show
//! them to a wallet in human-readable form the function's published ABI is
//! fetched through an [`AbiLookup`] and each argument is decoded against its
//! declared parameter type:
//! - `&signer` / `signer` parameters are implicit and skipped
//! - `vector<u8>` is kept as one opaque byte blob
//! - other vectors, `Option<T>`, `String` and `Object<T>` are decoded structurally
//! - each primitive goes through a wallet-specific [`ArgFormatter`]

pub mod decoder;
pub mod lookup;
pub mod types;


pub use decoder::*;
pub use lookup::*;
pub use types::*;

use crate::bcs::CodecError;

/// Error types for ABI resolution and argument decoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    #[error("ABI not found for module {module}")]
    AbiNotFound { module: String },

    #[error("function {function} not found in module {module}")]
    FunctionNotFound { module: String, function: String },

    #[error("wrong number of type arguments for {function}: expected {expected}, got {actual}")]
    WrongTypeArgCount {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("argument {index} of {function} (declared {declared_type}) failed to decode: {source}")]
    ArgumentDecode {
        function: String,
        index: usize,
        declared_type: String,
        source: CodecError,
    },

    #[error("ABI transport error: {0}")]
    Transport(String),

    #[error("invalid ABI: {0}")]
    InvalidAbi(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}
