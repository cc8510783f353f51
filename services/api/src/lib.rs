//! services/api/src/lib.rs
//!
//! The library root for the `api` service. The binaries in `src/bin` and the
//! integration tests both consume the service through this crate.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
