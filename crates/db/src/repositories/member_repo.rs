//! Repository for the `members` table.

use sqlx::PgPool;
use showcase_core::types::DbId;

use crate::models::member::{Member, MemberFields, MemberWithTeam};

const COLUMNS: &str =
    "id, name, affiliation, role, team_id, social_url, profile_image_url, created_at";

/// Provides CRUD operations for members.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a member, returning the created row.
    pub async fn create(pool: &PgPool, input: &MemberFields) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members (name, affiliation, role, team_id, social_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(&input.name)
            .bind(&input.affiliation)
            .bind(&input.role)
            .bind(input.team_id)
            .bind(&input.social_url)
            .fetch_one(pool)
            .await
    }

    /// Overwrite the editable fields. Returns `None` if no such member exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &MemberFields,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "UPDATE members SET
                name = $2,
                affiliation = $3,
                role = $4,
                team_id = $5,
                social_url = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.affiliation)
            .bind(&input.role)
            .bind(input.team_id)
            .bind(&input.social_url)
            .fetch_optional(pool)
            .await
    }

    /// Point the member at a newly uploaded profile picture.
    pub async fn set_profile_image_url(
        pool: &PgPool,
        id: DbId,
        url: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE members SET profile_image_url = $2 WHERE id = $1")
            .bind(id)
            .bind(url)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All members ordered by name, joined with their team name.
    pub async fn list_with_team(pool: &PgPool) -> Result<Vec<MemberWithTeam>, sqlx::Error> {
        sqlx::query_as::<_, MemberWithTeam>(
            "SELECT m.id, m.name, m.affiliation, m.role, m.team_id, m.social_url,
                    m.profile_image_url, m.created_at, t.name AS team_name
             FROM members m
             LEFT JOIN teams t ON t.id = m.team_id
             ORDER BY m.name",
        )
        .fetch_all(pool)
        .await
    }

    /// Members of one team ordered by name.
    pub async fn list_by_team(pool: &PgPool, team_id: DbId) -> Result<Vec<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE team_id = $1 ORDER BY name");
        sqlx::query_as::<_, Member>(&query)
            .bind(team_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
