//! metacog-storage
//!
//! Local persistence for the practice record. Two JSON documents inside a
//! data directory: the main document (therapist, patients, assessments) and
//! the mappings array.

pub mod document;
pub mod error;
pub mod objects;
pub mod state;
pub mod store;
