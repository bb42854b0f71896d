//! Repository for the `projects` table.

use sqlx::PgPool;
use showcase_core::types::DbId;

use crate::models::project::{Project, ProjectFields, ProjectWithTeam};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, summary, description, github_url, demo_url, team_id, \
                       thumbnail_url, created_at";

/// Same columns, qualified for queries joining `teams`.
const JOINED_COLUMNS: &str = "p.id, p.title, p.summary, p.description, p.github_url, \
                              p.demo_url, p.team_id, p.thumbnail_url, p.created_at, \
                              t.name AS team_name";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project with no thumbnail, returning the created row.
    pub async fn create(pool: &PgPool, input: &ProjectFields) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, summary, description, github_url, demo_url, team_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.github_url)
            .bind(&input.demo_url)
            .bind(input.team_id)
            .fetch_one(pool)
            .await
    }

    /// Overwrite every scalar field. `thumbnail_url` is left alone unless
    /// `clear_thumbnail` is set, in which case it becomes `NULL`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ProjectFields,
        clear_thumbnail: bool,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = $2,
                summary = $3,
                description = $4,
                github_url = $5,
                demo_url = $6,
                team_id = $7,
                thumbnail_url = CASE WHEN $8 THEN NULL ELSE thumbnail_url END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.github_url)
            .bind(&input.demo_url)
            .bind(input.team_id)
            .bind(clear_thumbnail)
            .fetch_optional(pool)
            .await
    }

    /// Point the project at a new thumbnail URL.
    pub async fn set_thumbnail_url(
        pool: &PgPool,
        id: DbId,
        url: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE projects SET thumbnail_url = $2 WHERE id = $1")
            .bind(id)
            .bind(url)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One project joined with its team name.
    pub async fn find_with_team(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectWithTeam>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p
             LEFT JOIN teams t ON t.id = p.team_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, ProjectWithTeam>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Projects joined with their team name, newest first.
    ///
    /// When `title_search` is given, only titles containing it
    /// (case-insensitive) are returned.
    pub async fn list_with_team(
        pool: &PgPool,
        title_search: Option<&str>,
    ) -> Result<Vec<ProjectWithTeam>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p
             LEFT JOIN teams t ON t.id = p.team_id
             WHERE ($1::text IS NULL OR p.title ILIKE '%' || $1 || '%')
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, ProjectWithTeam>(&query)
            .bind(title_search)
            .fetch_all(pool)
            .await
    }

    /// Permanently delete a project row. Child rows must be gone already.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
