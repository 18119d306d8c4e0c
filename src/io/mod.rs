//! Adapters between external row sources and the engine's raw-row
//! contract. These are the only places the crate touches readers and
//! writers; the engine core never performs I/O itself.

pub mod csv;
pub mod json;
