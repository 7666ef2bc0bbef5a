//! # hissab-shared
//!
//! Types shared by every Hissab crate: the persisted domain records, the
//! currency table, amount parsing, password hashing and the common error
//! enums.

pub mod amount;
pub mod constants;
pub mod crypto;
pub mod currency;
pub mod error;
pub mod types;

pub use types::*;
