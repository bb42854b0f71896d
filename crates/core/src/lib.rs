//! Domain building blocks shared by every showcase crate.
//!
//! Nothing in here performs I/O: validation, blob path conventions, form
//! field normalisation, progress accounting and list filtering are all pure
//! functions so the store, storage and HTTP layers can share them.

pub mod error;
pub mod fields;
pub mod progress;
pub mod roles;
pub mod roster;
pub mod search;
pub mod types;
pub mod upload;
