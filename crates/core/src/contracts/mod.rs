//! Business-rule contracts on import-ready outputs.
//!
//! Run after preparation and before anything is written. A violation means
//! the engines produced rows that must not reach the database.

pub mod error;
pub mod validator;

pub use error::ContractError;
pub use validator::{ContractReport, ContractValidator};
