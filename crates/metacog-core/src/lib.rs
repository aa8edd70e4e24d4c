//! metacog-core
//!
//! Pure domain types and storage key conventions.
//! No I/O. This is the shared vocabulary of the metacog workspace.

pub mod error;
pub mod models;
pub mod storage_keys;
