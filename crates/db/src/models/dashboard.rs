//! Aggregate counts shown on the admin dashboard.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardCounts {
    pub teams: i64,
    pub projects: i64,
    pub members: i64,
}
