//! # hissab-client
//!
//! Flow layer of Hissab: the [`Session`] context (who is logged in and their
//! cached settings) and the commands front ends call to sign up, log in,
//! record transactions, manage budgets and read analytics.

pub mod commands;
pub mod error;
pub mod state;

pub use error::{ClientError, Result};
pub use state::Session;
