//! Sensor bridge library.
//!
//! Owns the sensor cache, the ingestion loop that feeds it, and the HTTP
//! query service that reads it. Exposed as a library so integration tests
//! and the binary entrypoint share the same building blocks.

pub mod cache;
pub mod config;
pub mod error;
pub mod ingest;
pub mod router;
pub mod routes;
pub mod simulate;
pub mod source;
pub mod state;
