//! Repository for the `project_images` table.

use sqlx::PgPool;
use showcase_core::types::DbId;

use crate::models::project_image::ProjectImage;

const COLUMNS: &str = "id, project_id, image_url, display_order, created_at";

pub struct ProjectImageRepo;

impl ProjectImageRepo {
    /// Insert one row per URL in a single statement. `created_at` is
    /// assigned by the server.
    pub async fn create_many(
        pool: &PgPool,
        project_id: DbId,
        urls: &[String],
    ) -> Result<Vec<ProjectImage>, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_images (project_id, image_url)
             SELECT $1, url FROM UNNEST($2::text[]) AS url
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .bind(urls)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_images WHERE id = $1");
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Images of a project in display order (unordered rows last, by age).
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_images
             WHERE project_id = $1
             ORDER BY display_order ASC NULLS LAST, created_at ASC"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_for_project(pool: &PgPool, project_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_images WHERE project_id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
