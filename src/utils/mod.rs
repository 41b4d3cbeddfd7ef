//! Utilities Module
//!
//! Common utilities used across the crate.

mod cache;
pub mod crypto;
pub mod logging;
pub mod network_config;

pub use cache::*;
pub use crypto::*;
