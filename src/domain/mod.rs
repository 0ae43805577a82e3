//! Core domain types and logic.

pub mod quote;
pub mod instrument;
pub mod holding;
pub mod order;
pub mod portfolio;
pub mod ledger;
pub mod session;
pub mod summary;
pub mod config_validation;
pub mod error;
