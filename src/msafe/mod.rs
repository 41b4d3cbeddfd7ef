//! # MSafe transactions
//!
//! Builders for the `momentum_safe` entry functions owners call, plus a
//! display summary of a pending MSafe payload.

pub mod builder;
pub mod info;

#[cfg(test)]
mod tests;

pub use builder::*;
pub use info::*;

use crate::message::MessageError;
use crate::move_types::TypeTagError;

/// Module holding the MSafe wallet logic
pub const MOMENTUM_SAFE: &str = "momentum_safe";

pub mod functions {
    pub const INIT_TRANSACTION: &str = "init_transaction";
    pub const SUBMIT_SIGNATURE: &str = "submit_signature";
    pub const REVERT: &str = "do_nothing";
}

/// Error types for MSafe transaction construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MsafeError {
    #[error("invalid full function name '{0}', expected address::module::function")]
    InvalidFunctionName(String),

    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    #[error(transparent)]
    TypeTag(#[from] TypeTagError),

    #[error(transparent)]
    Message(#[from] MessageError),
}
