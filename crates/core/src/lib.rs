//! `agrolink-core` -- shared domain logic for the sensor bridge and the
//! sync agent.
//!
//! Everything in this crate is pure: no sockets, no files, no clocks other
//! than the timestamps callers pass in. Both binaries depend on it so the
//! wire types they exchange are defined exactly once.

pub mod error;
mod lenient;
pub mod parser;
pub mod protocol;
pub mod sensor;
pub mod snapshot;
pub mod thresholds;
pub mod types;
