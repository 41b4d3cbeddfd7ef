//! Type-tagged off-chain messages
//!
//! A tagged message is `bcs(type_info) || bcs(inner)`. The leading type info
//! is the only discriminant: a blob belongs to a variant iff it starts with
//! that variant's encoded type info. MSafe owners sign such blobs as proofs
//! (multisig account creation, auth key revocation on migration), and the
//! same pending-payload slot can instead hold a transaction signing message.

pub mod migration;
pub mod pending;
pub mod tagged;
pub mod type_info;


pub use migration::*;
pub use pending::*;
pub use tagged::*;
pub use type_info::*;

use crate::bcs::CodecError;

/// Error types for tagged messages and pending payloads
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("invalid type info: expected {expected}, found {found}")]
    InvalidTypeInfo { expected: String, found: String },

    #[error("payload does not start with the raw transaction signing prefix")]
    InvalidSigningPrefix,

    #[error("message decoding failed: {0}")]
    Codec(#[from] CodecError),
}
