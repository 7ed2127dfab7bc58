//! `agrolink-sync` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod sync_loop;
