//! Repository for the `teams` table.

use sqlx::PgPool;
use showcase_core::types::DbId;

use crate::models::team::{Team, TeamOption};

const COLUMNS: &str = "id, name, description, created_at";

/// Provides CRUD operations for teams.
pub struct TeamRepo;

impl TeamRepo {
    /// Insert a team, returning the created row.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        description: Option<&str>,
    ) -> Result<Team, sqlx::Error> {
        let query = format!(
            "INSERT INTO teams (name, description) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(name)
            .bind(description)
            .fetch_one(pool)
            .await
    }

    /// All teams, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams ORDER BY created_at DESC");
        sqlx::query_as::<_, Team>(&query).fetch_all(pool).await
    }

    /// `(id, name)` pairs ordered by name, for selection lists.
    pub async fn list_options(pool: &PgPool) -> Result<Vec<TeamOption>, sqlx::Error> {
        sqlx::query_as::<_, TeamOption>("SELECT id, name FROM teams ORDER BY name")
            .fetch_all(pool)
            .await
    }

    /// Replace name and description. Returns `None` if no such team exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<Team>, sqlx::Error> {
        let query = format!(
            "UPDATE teams SET name = $2, description = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .bind(name)
            .bind(description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a team. Members and projects keep existing with `team_id = NULL`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
