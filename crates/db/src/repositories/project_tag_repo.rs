//! Repository for the `project_tags` table.

use sqlx::PgPool;
use showcase_core::types::DbId;

use crate::models::project_tag::ProjectTag;

pub struct ProjectTagRepo;

impl ProjectTagRepo {
    /// Insert one row per tag for the project.
    pub async fn create_many(
        pool: &PgPool,
        project_id: DbId,
        tags: &[String],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO project_tags (project_id, tag)
             SELECT $1, tag FROM UNNEST($2::text[]) AS tag",
        )
        .bind(project_id)
        .bind(tags)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Remove every tag of the project.
    pub async fn delete_for_project(pool: &PgPool, project_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_tags WHERE project_id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT tag FROM project_tags WHERE project_id = $1 ORDER BY tag",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Tags of several projects in one round trip.
    pub async fn list_for_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<ProjectTag>, sqlx::Error> {
        sqlx::query_as::<_, ProjectTag>(
            "SELECT project_id, tag FROM project_tags
             WHERE project_id = ANY($1)
             ORDER BY project_id, tag",
        )
        .bind(project_ids)
        .fetch_all(pool)
        .await
    }
}
