//! Upload constraints and object-storage path conventions.
//!
//! Paths produced here are part of the storage layout contract: existing
//! public URLs point at them, so the formats must not drift.

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Bucket holding project thumbnails and gallery images.
pub const PROJECT_IMAGES_BUCKET: &str = "project-images";

/// Bucket holding project attachments.
pub const PROJECT_FILES_BUCKET: &str = "project-files";

/// Bucket holding member profile pictures.
pub const MEMBER_PROFILES_BUCKET: &str = "member-profiles";

/// Largest accepted image (thumbnail, gallery image, profile picture): 5 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Required prefix of an image content type.
const IMAGE_MIME_PREFIX: &str = "image/";

/// URL segment preceding the first component of a project-file path.
const PROJECTS_SEGMENT: &str = "projects";

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

// ---------------------------------------------------------------------------
// Incoming blobs
// ---------------------------------------------------------------------------

/// A blob received from a form submission, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingFile {
    /// Original file name as sent by the browser.
    pub file_name: String,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

// ---------------------------------------------------------------------------
// Image screening
// ---------------------------------------------------------------------------

/// Check the image constraints for one blob.
///
/// Returns a message naming the file when it is rejected.
pub fn check_image(file: &IncomingFile) -> Result<(), String> {
    let is_image = file
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with(IMAGE_MIME_PREFIX));
    if !is_image {
        return Err(format!("'{}' is not an image file", file.file_name));
    }
    if file.size() > MAX_IMAGE_BYTES {
        return Err(format!(
            "Image '{}' exceeds the 5 MiB size limit",
            file.file_name
        ));
    }
    Ok(())
}

/// Result of screening a batch of images.
#[derive(Debug, Default)]
pub struct ScreenedImages {
    pub accepted: Vec<IncomingFile>,
    /// One message per rejected file, in submission order.
    pub rejected: Vec<String>,
}

/// Split a batch into accepted images and rejection messages.
///
/// A rejected file never blocks the rest of the batch.
pub fn screen_images(files: Vec<IncomingFile>) -> ScreenedImages {
    let mut screened = ScreenedImages::default();
    for file in files {
        match check_image(&file) {
            Ok(()) => screened.accepted.push(file),
            Err(msg) => screened.rejected.push(msg),
        }
    }
    screened
}

// ---------------------------------------------------------------------------
// Path conventions
// ---------------------------------------------------------------------------

/// Replace every run of whitespace in a file name with a single `_`.
pub fn sanitize_file_name(name: &str) -> String {
    WHITESPACE_RUN.replace_all(name, "_").into_owned()
}

/// `members/{memberId}-{sanitized}`
pub fn member_profile_path(member_id: DbId, file_name: &str) -> String {
    format!("members/{member_id}-{}", sanitize_file_name(file_name))
}

/// `projects/{projectId}/thumbnail/{uuid}-{sanitized}`
pub fn project_thumbnail_path(project_id: DbId, unique: Uuid, file_name: &str) -> String {
    format!(
        "projects/{project_id}/thumbnail/{unique}-{}",
        sanitize_file_name(file_name)
    )
}

/// `projects/{projectId}/images/{uuid}-{sanitized}`
pub fn project_image_path(project_id: DbId, unique: Uuid, file_name: &str) -> String {
    format!(
        "projects/{project_id}/images/{unique}-{}",
        sanitize_file_name(file_name)
    )
}

/// `projects/{projectId}/files/{uuid}-{sanitized}`
pub fn project_file_path(project_id: DbId, unique: Uuid, file_name: &str) -> String {
    format!(
        "projects/{project_id}/files/{unique}-{}",
        sanitize_file_name(file_name)
    )
}

// ---------------------------------------------------------------------------
// Path recovery from public URLs
// ---------------------------------------------------------------------------

/// Storage path of a gallery image: everything after the first
/// `project-images` segment of its public URL.
///
/// Returns `None` when the segment is absent or nothing follows it.
pub fn image_path_from_url(url: &str) -> Option<String> {
    let segments: Vec<&str> = url.split('/').collect();
    let idx = segments.iter().position(|s| *s == PROJECT_IMAGES_BUCKET)?;
    let path = segments[idx + 1..].join("/");
    (!path.is_empty()).then_some(path)
}

/// Storage path of an attached file: everything from the first `projects`
/// segment of its public URL onward.
pub fn file_path_from_url(url: &str) -> Option<String> {
    let segments: Vec<&str> = url.split('/').collect();
    let idx = segments.iter().position(|s| *s == PROJECTS_SEGMENT)?;
    Some(segments[idx..].join("/"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
