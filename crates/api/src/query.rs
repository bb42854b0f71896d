//! Shared query parameter types for API handlers.

use serde::Deserialize;
use showcase_core::types::DbId;

use crate::error::{AppError, AppResult};

/// `?q=&team_id=` filters of the admin list views.
#[derive(Debug, Default, Deserialize)]
pub struct ListFilter {
    pub q: Option<String>,
    pub team_id: Option<DbId>,
}

impl ListFilter {
    /// Search term with surrounding whitespace removed; `None` when blank.
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// `?confirm=true` guard of destructive actions.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmParams {
    #[serde(default)]
    pub confirm: bool,
}

impl ConfirmParams {
    /// Reject the request unless the caller explicitly confirmed it.
    pub fn require(&self, what: &str) -> AppResult<()> {
        if self.confirm {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "Deleting {what} requires confirm=true"
            )))
        }
    }
}
