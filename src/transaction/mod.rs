//! Transaction model
//!
//! Raw transactions, their payload variants, authenticators and the signed
//! envelope, all with canonical encodings. The signing message is a pure
//! function of the raw transaction plus a fixed domain-separation prefix.

pub mod authenticator;
pub mod payload;
pub mod raw;
pub mod signed;
pub mod signing_message;

#[cfg(test)]
mod tests;

pub use authenticator::*;
pub use payload::*;
pub use raw::*;
pub use signed::*;
pub use signing_message::*;

/// Payload shape errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("unsupported payload type: {0} (only entry function payloads can be presented to a wallet)")]
    UnsupportedPayloadType(&'static str),
}
