//! Store seams used by the workflows.
//!
//! The traits list exactly the remote calls a workflow may issue. [`PgStore`]
//! forwards them to the repositories; tests substitute in-memory doubles.

use async_trait::async_trait;
use showcase_core::types::DbId;
use showcase_db::models::member::{Member, MemberFields};
use showcase_db::models::project::{Project, ProjectFields};
use showcase_db::models::project_file::{CreateProjectFile, ProjectFile};
use showcase_db::models::project_image::ProjectImage;
use showcase_db::repositories::{
    MemberRepo, ProjectFileRepo, ProjectImageRepo, ProjectRepo, ProjectTagRepo,
};
use showcase_db::DbPool;

use crate::error::StoreError;

/// Remote calls issued by [`crate::ProjectUpsert`].
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn insert_project(&self, fields: &ProjectFields) -> Result<Project, StoreError>;

    /// `Ok(None)` when no project has this id.
    async fn update_project(
        &self,
        id: DbId,
        fields: &ProjectFields,
        clear_thumbnail: bool,
    ) -> Result<Option<Project>, StoreError>;

    async fn set_thumbnail_url(&self, id: DbId, url: &str) -> Result<(), StoreError>;

    async fn delete_project(&self, id: DbId) -> Result<bool, StoreError>;

    async fn insert_images(
        &self,
        project_id: DbId,
        urls: &[String],
    ) -> Result<Vec<ProjectImage>, StoreError>;

    async fn find_image(&self, id: DbId) -> Result<Option<ProjectImage>, StoreError>;

    async fn delete_image(&self, id: DbId) -> Result<bool, StoreError>;

    async fn delete_images_for_project(&self, project_id: DbId) -> Result<u64, StoreError>;

    async fn insert_tags(&self, project_id: DbId, tags: &[String]) -> Result<(), StoreError>;

    async fn delete_tags(&self, project_id: DbId) -> Result<(), StoreError>;

    async fn insert_file(&self, input: &CreateProjectFile) -> Result<ProjectFile, StoreError>;

    async fn find_file(&self, id: DbId) -> Result<Option<ProjectFile>, StoreError>;

    async fn delete_file(&self, id: DbId) -> Result<bool, StoreError>;

    async fn delete_files_for_project(&self, project_id: DbId) -> Result<u64, StoreError>;
}

/// Remote calls issued by [`crate::MemberProfiles`].
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn insert_member(&self, fields: &MemberFields) -> Result<Member, StoreError>;

    /// `Ok(None)` when no member has this id.
    async fn update_member(
        &self,
        id: DbId,
        fields: &MemberFields,
    ) -> Result<Option<Member>, StoreError>;

    async fn set_profile_image_url(&self, id: DbId, url: &str) -> Result<(), StoreError>;
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn insert_project(&self, fields: &ProjectFields) -> Result<Project, StoreError> {
        Ok(ProjectRepo::create(&self.pool, fields).await?)
    }

    async fn update_project(
        &self,
        id: DbId,
        fields: &ProjectFields,
        clear_thumbnail: bool,
    ) -> Result<Option<Project>, StoreError> {
        Ok(ProjectRepo::update(&self.pool, id, fields, clear_thumbnail).await?)
    }

    async fn set_thumbnail_url(&self, id: DbId, url: &str) -> Result<(), StoreError> {
        if !ProjectRepo::set_thumbnail_url(&self.pool, id, url).await? {
            return Err(StoreError::Backend(format!("project {id} no longer exists")));
        }
        Ok(())
    }

    async fn delete_project(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ProjectRepo::delete(&self.pool, id).await?)
    }

    async fn insert_images(
        &self,
        project_id: DbId,
        urls: &[String],
    ) -> Result<Vec<ProjectImage>, StoreError> {
        Ok(ProjectImageRepo::create_many(&self.pool, project_id, urls).await?)
    }

    async fn find_image(&self, id: DbId) -> Result<Option<ProjectImage>, StoreError> {
        Ok(ProjectImageRepo::find_by_id(&self.pool, id).await?)
    }

    async fn delete_image(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ProjectImageRepo::delete(&self.pool, id).await?)
    }

    async fn delete_images_for_project(&self, project_id: DbId) -> Result<u64, StoreError> {
        Ok(ProjectImageRepo::delete_for_project(&self.pool, project_id).await?)
    }

    async fn insert_tags(&self, project_id: DbId, tags: &[String]) -> Result<(), StoreError> {
        ProjectTagRepo::create_many(&self.pool, project_id, tags).await?;
        Ok(())
    }

    async fn delete_tags(&self, project_id: DbId) -> Result<(), StoreError> {
        ProjectTagRepo::delete_for_project(&self.pool, project_id).await?;
        Ok(())
    }

    async fn insert_file(&self, input: &CreateProjectFile) -> Result<ProjectFile, StoreError> {
        Ok(ProjectFileRepo::create(&self.pool, input).await?)
    }

    async fn find_file(&self, id: DbId) -> Result<Option<ProjectFile>, StoreError> {
        Ok(ProjectFileRepo::find_by_id(&self.pool, id).await?)
    }

    async fn delete_file(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ProjectFileRepo::delete(&self.pool, id).await?)
    }

    async fn delete_files_for_project(&self, project_id: DbId) -> Result<u64, StoreError> {
        Ok(ProjectFileRepo::delete_for_project(&self.pool, project_id).await?)
    }
}

#[async_trait]
impl MemberStore for PgStore {
    async fn insert_member(&self, fields: &MemberFields) -> Result<Member, StoreError> {
        Ok(MemberRepo::create(&self.pool, fields).await?)
    }

    async fn update_member(
        &self,
        id: DbId,
        fields: &MemberFields,
    ) -> Result<Option<Member>, StoreError> {
        Ok(MemberRepo::update(&self.pool, id, fields).await?)
    }

    async fn set_profile_image_url(&self, id: DbId, url: &str) -> Result<(), StoreError> {
        if !MemberRepo::set_profile_image_url(&self.pool, id, url).await? {
            return Err(StoreError::Backend(format!("member {id} no longer exists")));
        }
        Ok(())
    }
}
