//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Workflow endpoints add
//! the non-fatal step messages next to it.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "warnings": [...] }` for multi-step writes that succeeded
/// with some child steps skipped.
#[derive(Debug, Serialize)]
pub struct OutcomeResponse<T: Serialize> {
    pub data: T,
    pub warnings: Vec<String>,
}
