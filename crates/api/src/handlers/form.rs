//! Multipart form decoding for the project and member editors.
//!
//! Text fields arrive as plain parts; blobs as file parts. Browsers submit an
//! empty part for an untouched file input, which is treated as "no file".

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use showcase_core::types::DbId;
use showcase_core::upload::IncomingFile;
use showcase_workflow::{MemberSubmission, ProjectSubmission};

use crate::error::{AppError, AppResult};

/// Decode the project create/edit form.
pub async fn project_submission(mut multipart: Multipart) -> AppResult<ProjectSubmission> {
    let mut submission = ProjectSubmission::default();

    while let Some(field) = next_field(&mut multipart).await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => submission.title = text(field).await?,
            "summary" => submission.summary = Some(text(field).await?),
            "description" => submission.description = Some(text(field).await?),
            "github_url" => submission.github_url = Some(text(field).await?),
            "demo_url" => submission.demo_url = Some(text(field).await?),
            "team_id" => submission.team_id = parse_team_id(&text(field).await?)?,
            "tags" => submission.tags.push(text(field).await?),
            "remove_thumbnail" => submission.remove_thumbnail = parse_flag(&text(field).await?),
            "thumbnail" => submission.thumbnail = file(field).await?,
            "images" => submission.images.extend(file(field).await?),
            "files" => submission.files.extend(file(field).await?),
            other => tracing::debug!(field = other, "Ignoring unknown project form field"),
        }
    }

    Ok(submission)
}

/// Decode the member create/edit form.
pub async fn member_submission(mut multipart: Multipart) -> AppResult<MemberSubmission> {
    let mut submission = MemberSubmission::default();

    while let Some(field) = next_field(&mut multipart).await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "name" => submission.name = text(field).await?,
            "affiliation" => submission.affiliation = Some(text(field).await?),
            "role" => submission.role = Some(text(field).await?),
            "team_id" => submission.team_id = parse_team_id(&text(field).await?)?,
            "social_url" => submission.social_url = Some(text(field).await?),
            "profile_image" => submission.profile_image = file(field).await?,
            other => tracing::debug!(field = other, "Ignoring unknown member form field"),
        }
    }

    Ok(submission)
}

async fn next_field(multipart: &mut Multipart) -> AppResult<Option<Field<'_>>> {
    multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

async fn text(field: Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

async fn file(field: Field<'_>) -> AppResult<Option<IncomingFile>> {
    let file_name = field.file_name().unwrap_or("").to_string();
    let content_type = field.content_type().map(str::to_string);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if file_name.is_empty() && bytes.is_empty() {
        return Ok(None);
    }
    let file_name = if file_name.is_empty() {
        "upload".to_string()
    } else {
        file_name
    };
    Ok(Some(IncomingFile::new(file_name, content_type, bytes.to_vec())))
}

/// Blank means "no team"; anything else must be a valid id.
fn parse_team_id(raw: &str) -> AppResult<Option<DbId>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<DbId>()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("Invalid team_id: {raw}")))
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim(), "true" | "1" | "on")
}
