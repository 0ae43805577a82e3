//! papertrade — virtual trading simulator.
//!
//! Hexagonal architecture: the pure portfolio ledger and session logic live in
//! [`domain`], port traits in [`ports`], file-backed implementations in
//! [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
