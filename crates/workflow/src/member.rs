//! Member create/edit with an optional profile picture.
//!
//! The member row is written first; the picture is uploaded under a
//! member-scoped path with overwrite enabled and linked afterwards. A failed
//! picture step never undoes the row write.

use std::sync::Arc;

use showcase_core::error::CoreError;
use showcase_core::fields::{blank_to_none, require_non_blank, trimmed_or_none};
use showcase_core::progress::{ProgressSink, ProgressStage, UploadProgress};
use showcase_core::types::DbId;
use showcase_core::upload::{check_image, member_profile_path, IncomingFile, MEMBER_PROFILES_BUCKET};
use showcase_db::models::member::{Member, MemberFields};
use showcase_storage::ObjectStorage;

use crate::error::{StepError, WorkflowError};
use crate::store::MemberStore;

/// Member form contents.
#[derive(Debug, Clone, Default)]
pub struct MemberSubmission {
    pub name: String,
    pub affiliation: Option<String>,
    pub role: Option<String>,
    pub team_id: Option<DbId>,
    pub social_url: Option<String>,
    pub profile_image: Option<IncomingFile>,
}

impl MemberSubmission {
    pub fn fields(&self) -> Result<MemberFields, CoreError> {
        Ok(MemberFields {
            name: require_non_blank(&self.name, "Member name")?,
            affiliation: trimmed_or_none(self.affiliation.as_deref()),
            role: trimmed_or_none(self.role.as_deref()),
            team_id: self.team_id,
            social_url: blank_to_none(self.social_url.as_deref()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct MemberOutcome {
    pub member: Member,
    pub warnings: Vec<String>,
}

/// Orchestrates member writes and profile picture uploads.
#[derive(Clone)]
pub struct MemberProfiles {
    store: Arc<dyn MemberStore>,
    storage: Arc<dyn ObjectStorage>,
}

impl MemberProfiles {
    pub fn new(store: Arc<dyn MemberStore>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { store, storage }
    }

    pub async fn create(
        &self,
        submission: MemberSubmission,
        progress: &dyn ProgressSink,
    ) -> Result<MemberOutcome, WorkflowError> {
        let fields = submission.fields()?;
        let member = self.store.insert_member(&fields).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to insert member");
            e
        })?;
        tracing::info!(member_id = %member.id, "Member created");

        Ok(self
            .attach_profile(member, submission.profile_image, progress)
            .await)
    }

    pub async fn update(
        &self,
        member_id: DbId,
        submission: MemberSubmission,
        progress: &dyn ProgressSink,
    ) -> Result<MemberOutcome, WorkflowError> {
        let fields = submission.fields()?;
        let member = self
            .store
            .update_member(member_id, &fields)
            .await
            .map_err(|e| {
                tracing::error!(member_id = %member_id, error = %e, "Failed to update member");
                e
            })?
            .ok_or(CoreError::NotFound {
                entity: "Member",
                id: member_id,
            })?;
        tracing::info!(member_id = %member_id, "Member updated");

        Ok(self
            .attach_profile(member, submission.profile_image, progress)
            .await)
    }

    async fn attach_profile(
        &self,
        mut member: Member,
        image: Option<IncomingFile>,
        sink: &dyn ProgressSink,
    ) -> MemberOutcome {
        let mut warnings = Vec::new();
        let Some(image) = image else {
            return MemberOutcome { member, warnings };
        };

        if let Err(msg) = check_image(&image) {
            warnings.push(msg);
            return MemberOutcome { member, warnings };
        }

        match self.upload_profile(member.id, &image, sink).await {
            Ok(url) => member.profile_image_url = Some(url),
            Err(e) => {
                tracing::warn!(member_id = %member.id, error = %e, "Profile image upload failed");
                warnings.push(format!(
                    "Profile image '{}' could not be saved. Other changes were saved.",
                    image.file_name
                ));
            }
        }
        MemberOutcome { member, warnings }
    }

    async fn upload_profile(
        &self,
        member_id: DbId,
        image: &IncomingFile,
        sink: &dyn ProgressSink,
    ) -> Result<String, StepError> {
        let path = member_profile_path(member_id, &image.file_name);
        self.storage
            .upload(
                MEMBER_PROFILES_BUCKET,
                &path,
                &image.bytes,
                image.content_type.as_deref(),
                true,
            )
            .await?;
        UploadProgress::new(ProgressStage::Profile, 1).record_success(sink);

        let url = self.storage.public_url(MEMBER_PROFILES_BUCKET, &path);
        self.store.set_profile_image_url(member_id, &url).await?;
        Ok(url)
    }
}
