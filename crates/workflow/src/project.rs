//! Project create/edit workflow and the child-record actions around it.
//!
//! Step order is fixed: project row, then thumbnail and gallery images, then
//! attached files, then tags. Only the project row write is fatal. A failed
//! image step stops the sequence but the call still succeeds with a warning,
//! because the project row already exists.

use std::sync::Arc;

use showcase_core::error::CoreError;
use showcase_core::fields::{blank_to_none, normalize_tags, require_non_blank};
use showcase_core::progress::{ProgressSink, ProgressStage, UploadProgress};
use showcase_core::types::DbId;
use showcase_core::upload::{
    check_image, file_path_from_url, image_path_from_url, project_file_path,
    project_image_path, project_thumbnail_path, screen_images, IncomingFile,
    PROJECT_FILES_BUCKET, PROJECT_IMAGES_BUCKET,
};
use showcase_db::models::project::{Project, ProjectFields};
use showcase_db::models::project_file::{CreateProjectFile, ProjectFile};
use showcase_db::models::project_image::ProjectImage;
use showcase_storage::ObjectStorage;
use uuid::Uuid;

use crate::error::{StepError, WorkflowError};
use crate::store::ProjectStore;

/// Everything a create or edit form submits.
#[derive(Debug, Clone, Default)]
pub struct ProjectSubmission {
    pub title: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub team_id: Option<DbId>,
    /// Complete tag set after the submit; replaces the stored set on edit.
    pub tags: Vec<String>,
    pub thumbnail: Option<IncomingFile>,
    pub images: Vec<IncomingFile>,
    pub files: Vec<IncomingFile>,
    /// Edit only: drop the current thumbnail in the row update.
    pub remove_thumbnail: bool,
}

impl ProjectSubmission {
    /// Validate the title and null out blank optional fields.
    pub fn fields(&self) -> Result<ProjectFields, CoreError> {
        Ok(ProjectFields {
            title: require_non_blank(&self.title, "Project title")?,
            summary: blank_to_none(self.summary.as_deref()),
            description: blank_to_none(self.description.as_deref()),
            github_url: blank_to_none(self.github_url.as_deref()),
            demo_url: blank_to_none(self.demo_url.as_deref()),
            team_id: self.team_id,
        })
    }
}

/// Result of a create or edit that got past the project row write.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    /// The project row, including a thumbnail URL set by this call.
    pub project: Project,
    /// Gallery rows added by this call.
    pub images: Vec<ProjectImage>,
    /// File rows added by this call.
    pub files: Vec<ProjectFile>,
    /// Tag set submitted for the project.
    pub tags: Vec<String>,
    /// User-facing messages for rejected blobs and non-fatal step failures.
    pub warnings: Vec<String>,
}

/// URLs produced by a successful gallery step.
struct GalleryUpload {
    thumbnail_url: Option<String>,
    images: Vec<ProjectImage>,
}

/// Submission after pre-flight checks, before any remote call.
struct Prepared {
    fields: ProjectFields,
    tags: Vec<String>,
    thumbnail: Option<IncomingFile>,
    images: Vec<IncomingFile>,
    files: Vec<IncomingFile>,
    warnings: Vec<String>,
}

/// Orchestrates project writes across the store and object storage.
#[derive(Clone)]
pub struct ProjectUpsert {
    store: Arc<dyn ProjectStore>,
    storage: Arc<dyn ObjectStorage>,
}

impl ProjectUpsert {
    pub fn new(store: Arc<dyn ProjectStore>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { store, storage }
    }

    // -----------------------------------------------------------------------
    // Create / edit
    // -----------------------------------------------------------------------

    /// Create a project with its thumbnail, gallery images, files and tags.
    pub async fn create(
        &self,
        submission: ProjectSubmission,
        progress: &dyn ProgressSink,
    ) -> Result<UpsertOutcome, WorkflowError> {
        let Prepared {
            fields,
            tags,
            thumbnail,
            images,
            files,
            mut warnings,
        } = prepare(submission)?;

        let mut project = self.store.insert_project(&fields).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to insert project");
            e
        })?;
        tracing::info!(project_id = %project.id, title = %project.title, "Project created");

        let mut outcome_images = Vec::new();
        if thumbnail.is_some() || !images.is_empty() {
            match self
                .upload_gallery(project.id, thumbnail.as_ref(), &images, None, progress)
                .await
            {
                Ok(gallery) => {
                    if gallery.thumbnail_url.is_some() {
                        project.thumbnail_url = gallery.thumbnail_url;
                    }
                    outcome_images = gallery.images;
                }
                Err(e) => {
                    tracing::warn!(project_id = %project.id, error = %e, "Image upload failed after project insert");
                    warnings.push(
                        "Image upload failed. The project was created without all of its images."
                            .to_string(),
                    );
                    return Ok(UpsertOutcome {
                        project,
                        images: Vec::new(),
                        files: Vec::new(),
                        tags,
                        warnings,
                    });
                }
            }
        }

        let mut outcome_files = Vec::new();
        if !files.is_empty() {
            let (attached, warning) = self.attach_files(project.id, &files, progress).await;
            outcome_files = attached;
            warnings.extend(warning);
        }

        if !tags.is_empty() {
            if let Err(e) = self.store.insert_tags(project.id, &tags).await {
                tracing::warn!(project_id = %project.id, error = %e, "Failed to save project tags");
            }
        }

        Ok(UpsertOutcome {
            project,
            images: outcome_images,
            files: outcome_files,
            tags,
            warnings,
        })
    }

    /// Update a project, append new images and files, and replace its tags.
    pub async fn edit(
        &self,
        project_id: DbId,
        submission: ProjectSubmission,
        progress: &dyn ProgressSink,
    ) -> Result<UpsertOutcome, WorkflowError> {
        let remove_thumbnail = submission.remove_thumbnail;
        let Prepared {
            fields,
            tags,
            thumbnail,
            images,
            files,
            mut warnings,
        } = prepare(submission)?;

        let mut project = self
            .store
            .update_project(project_id, &fields, remove_thumbnail)
            .await
            .map_err(|e| {
                tracing::error!(project_id = %project_id, error = %e, "Failed to update project");
                e
            })?
            .ok_or(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            })?;
        tracing::info!(project_id = %project_id, "Project updated");

        let mut outcome_images = Vec::new();
        if thumbnail.is_some() || !images.is_empty() {
            let existing = project.thumbnail_url.clone();
            match self
                .upload_gallery(
                    project_id,
                    thumbnail.as_ref(),
                    &images,
                    existing.as_deref(),
                    progress,
                )
                .await
            {
                Ok(gallery) => {
                    if gallery.thumbnail_url.is_some() {
                        project.thumbnail_url = gallery.thumbnail_url;
                    }
                    outcome_images = gallery.images;
                }
                Err(e) => {
                    tracing::warn!(project_id = %project_id, error = %e, "Image upload failed during edit");
                    warnings.push(
                        "Image upload failed. Other changes were saved.".to_string(),
                    );
                    return Ok(UpsertOutcome {
                        project,
                        images: Vec::new(),
                        files: Vec::new(),
                        tags,
                        warnings,
                    });
                }
            }
        }

        let mut outcome_files = Vec::new();
        if !files.is_empty() {
            let (attached, warning) = self.attach_files(project_id, &files, progress).await;
            outcome_files = attached;
            warnings.extend(warning);
        }

        self.replace_tags(project_id, &tags).await;

        Ok(UpsertOutcome {
            project,
            images: outcome_images,
            files: outcome_files,
            tags,
            warnings,
        })
    }

    // -----------------------------------------------------------------------
    // Independent child-record actions
    // -----------------------------------------------------------------------

    /// Delete a gallery image row, then its blob on a best-effort basis.
    ///
    /// A storage failure leaves an orphaned blob and is only logged.
    pub async fn remove_image(
        &self,
        project_id: DbId,
        image_id: DbId,
    ) -> Result<ProjectImage, WorkflowError> {
        let not_found = || CoreError::NotFound {
            entity: "ProjectImage",
            id: image_id,
        };

        let image = self
            .store
            .find_image(image_id)
            .await?
            .filter(|img| img.project_id == project_id)
            .ok_or_else(not_found)?;

        if !self.store.delete_image(image_id).await? {
            return Err(not_found().into());
        }
        tracing::info!(project_id = %project_id, image_id = %image_id, "Project image deleted");

        match image_path_from_url(&image.image_url) {
            Some(path) => {
                if let Err(e) = self.storage.remove(PROJECT_IMAGES_BUCKET, &[path]).await {
                    tracing::warn!(image_id = %image_id, error = %e, "Failed to delete image blob");
                }
            }
            None => {
                tracing::warn!(image_id = %image_id, url = %image.image_url, "Image URL has no storage path");
            }
        }

        Ok(image)
    }

    /// Delete an attached file's blob, then its row.
    pub async fn delete_file(
        &self,
        project_id: DbId,
        file_id: DbId,
    ) -> Result<ProjectFile, WorkflowError> {
        let not_found = || CoreError::NotFound {
            entity: "ProjectFile",
            id: file_id,
        };

        let file = self
            .store
            .find_file(file_id)
            .await?
            .filter(|f| f.project_id == project_id)
            .ok_or_else(not_found)?;

        match file_path_from_url(&file.file_url) {
            Some(path) => {
                if let Err(e) = self.storage.remove(PROJECT_FILES_BUCKET, &[path]).await {
                    tracing::warn!(file_id = %file_id, error = %e, "Failed to delete file blob");
                }
            }
            None => {
                tracing::warn!(file_id = %file_id, url = %file.file_url, "File URL has no storage path");
            }
        }

        if !self.store.delete_file(file_id).await? {
            return Err(not_found().into());
        }
        tracing::info!(project_id = %project_id, file_id = %file_id, "Project file deleted");

        Ok(file)
    }

    /// Delete a project after its tag, image and file rows. Blobs stay.
    pub async fn delete_project(&self, project_id: DbId) -> Result<(), WorkflowError> {
        if let Err(e) = self.store.delete_tags(project_id).await {
            tracing::warn!(project_id = %project_id, error = %e, "Failed to delete project tags");
        }
        if let Err(e) = self.store.delete_images_for_project(project_id).await {
            tracing::warn!(project_id = %project_id, error = %e, "Failed to delete project images");
        }
        if let Err(e) = self.store.delete_files_for_project(project_id).await {
            tracing::warn!(project_id = %project_id, error = %e, "Failed to delete project files");
        }

        if !self.store.delete_project(project_id).await? {
            return Err(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }
            .into());
        }
        tracing::info!(project_id = %project_id, "Project deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Steps
    // -----------------------------------------------------------------------

    /// Upload thumbnail and images one at a time, then link them.
    ///
    /// `existing_thumbnail` is the row's current URL; the row is only updated
    /// when the resolved thumbnail differs from it.
    async fn upload_gallery(
        &self,
        project_id: DbId,
        thumbnail: Option<&IncomingFile>,
        images: &[IncomingFile],
        existing_thumbnail: Option<&str>,
        sink: &dyn ProgressSink,
    ) -> Result<GalleryUpload, StepError> {
        let total = usize::from(thumbnail.is_some()) + images.len();
        let mut progress = UploadProgress::new(ProgressStage::Images, total);

        let mut new_thumbnail = None;
        if let Some(file) = thumbnail {
            let path = project_thumbnail_path(project_id, Uuid::new_v4(), &file.file_name);
            new_thumbnail = Some(self.upload_image(&path, file).await?);
            progress.record_success(sink);
        }

        let mut urls = Vec::with_capacity(images.len());
        for file in images {
            let path = project_image_path(project_id, Uuid::new_v4(), &file.file_name);
            urls.push(self.upload_image(&path, file).await?);
            progress.record_success(sink);
        }

        let resolved = new_thumbnail.as_deref().or(existing_thumbnail);
        if let Some(url) = resolved {
            if Some(url) != existing_thumbnail {
                self.store.set_thumbnail_url(project_id, url).await?;
            }
        }

        let rows = if urls.is_empty() {
            Vec::new()
        } else {
            self.store.insert_images(project_id, &urls).await?
        };

        Ok(GalleryUpload {
            thumbnail_url: new_thumbnail,
            images: rows,
        })
    }

    async fn upload_image(&self, path: &str, file: &IncomingFile) -> Result<String, StepError> {
        self.storage
            .upload(
                PROJECT_IMAGES_BUCKET,
                path,
                &file.bytes,
                file.content_type.as_deref(),
                false,
            )
            .await?;
        Ok(self.storage.public_url(PROJECT_IMAGES_BUCKET, path))
    }

    /// Upload and record each file independently.
    ///
    /// Returns the rows created and, if anything was skipped, one aggregated
    /// message naming every skipped file.
    async fn attach_files(
        &self,
        project_id: DbId,
        files: &[IncomingFile],
        sink: &dyn ProgressSink,
    ) -> (Vec<ProjectFile>, Option<String>) {
        let mut progress = UploadProgress::new(ProgressStage::Files, files.len());
        let mut attached = Vec::with_capacity(files.len());
        let mut skipped = Vec::new();

        for file in files {
            let path = project_file_path(project_id, Uuid::new_v4(), &file.file_name);
            if let Err(e) = self
                .storage
                .upload(
                    PROJECT_FILES_BUCKET,
                    &path,
                    &file.bytes,
                    file.content_type.as_deref(),
                    false,
                )
                .await
            {
                tracing::warn!(project_id = %project_id, file = %file.file_name, error = %e, "File upload failed");
                skipped.push(format!("{} (upload failed)", file.file_name));
                continue;
            }

            let input = CreateProjectFile {
                project_id,
                file_name: file.file_name.clone(),
                file_url: self.storage.public_url(PROJECT_FILES_BUCKET, &path),
            };
            match self.store.insert_file(&input).await {
                Ok(row) => {
                    attached.push(row);
                    progress.record_success(sink);
                }
                Err(e) => {
                    tracing::warn!(project_id = %project_id, file = %file.file_name, error = %e, "Failed to record uploaded file");
                    skipped.push(format!("{} (could not be recorded)", file.file_name));
                }
            }
        }

        let warning = (!skipped.is_empty()).then(|| {
            format!(
                "{} of {} files could not be attached: {}",
                skipped.len(),
                files.len(),
                skipped.join(", ")
            )
        });
        (attached, warning)
    }

    /// Delete every tag of the project, then insert the new set.
    ///
    /// Both halves are log-only on failure.
    async fn replace_tags(&self, project_id: DbId, tags: &[String]) {
        if let Err(e) = self.store.delete_tags(project_id).await {
            tracing::warn!(project_id = %project_id, error = %e, "Failed to delete project tags");
        }
        if tags.is_empty() {
            return;
        }
        if let Err(e) = self.store.insert_tags(project_id, tags).await {
            tracing::warn!(project_id = %project_id, error = %e, "Failed to save project tags");
        }
    }
}

/// Pre-flight: validate, normalise and screen images. No remote calls.
fn prepare(submission: ProjectSubmission) -> Result<Prepared, CoreError> {
    let fields = submission.fields()?;
    let tags = normalize_tags(&submission.tags);
    let mut warnings = Vec::new();

    let thumbnail = submission
        .thumbnail
        .and_then(|file| match check_image(&file) {
            Ok(()) => Some(file),
            Err(msg) => {
                warnings.push(msg);
                None
            }
        });

    let screened = screen_images(submission.images);
    warnings.extend(screened.rejected);

    Ok(Prepared {
        fields,
        tags,
        thumbnail,
        images: screened.accepted,
        files: submission.files,
        warnings,
    })
}
