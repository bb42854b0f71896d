//! Head-only counts for the admin dashboard.

use sqlx::PgPool;

use crate::models::dashboard::DashboardCounts;

pub struct DashboardRepo;

impl DashboardRepo {
    pub async fn counts(pool: &PgPool) -> Result<DashboardCounts, sqlx::Error> {
        let (teams, projects, members) = sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT
                (SELECT COUNT(*) FROM teams),
                (SELECT COUNT(*) FROM projects),
                (SELECT COUNT(*) FROM members)",
        )
        .fetch_one(pool)
        .await?;

        Ok(DashboardCounts {
            teams,
            projects,
            members,
        })
    }
}
