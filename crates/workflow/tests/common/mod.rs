//! In-memory doubles for the workflow seams.
//!
//! `MemoryStore` and `MemoryStorage` keep their state behind a `Mutex` and
//! log every call, so tests can assert both the final state and the exact
//! sequence of remote calls. Failures are injected per operation name.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use showcase_core::progress::{ProgressSink, ProgressStage};
use showcase_core::types::DbId;
use showcase_core::upload::IncomingFile;
use showcase_db::models::member::{Member, MemberFields};
use showcase_db::models::project::{Project, ProjectFields};
use showcase_db::models::project_file::{CreateProjectFile, ProjectFile};
use showcase_db::models::project_image::ProjectImage;
use showcase_storage::{public_object_url, ObjectStorage, StorageError};
use showcase_workflow::{
    MemberProfiles, MemberStore, ProjectStore, ProjectUpsert, StoreError,
};
use uuid::Uuid;

pub const PUBLIC_BASE: &str = "https://cdn.example.com";

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct StoreState {
    pub projects: HashMap<DbId, Project>,
    pub images: Vec<ProjectImage>,
    pub tags: Vec<(DbId, String)>,
    pub files: Vec<ProjectFile>,
    pub members: HashMap<DbId, Member>,
    pub calls: Vec<String>,
    failing: HashSet<&'static str>,
    /// File names whose `insert_file` call fails.
    failing_file_rows: HashSet<String>,
    /// Operations preceded by a concurrent delete of the target row.
    deleted_before: HashSet<&'static str>,
}

#[derive(Default)]
pub struct MemoryStore {
    pub state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn fail(&self, op: &'static str) {
        self.state.lock().unwrap().failing.insert(op);
    }

    /// Drop the targeted row just before `op` runs, as if another admin
    /// deleted it mid-request.
    pub fn delete_row_before(&self, op: &'static str) {
        self.state.lock().unwrap().deleted_before.insert(op);
    }

    pub fn fail_file_row(&self, file_name: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_file_rows
            .insert(file_name.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn project(&self, id: DbId) -> Option<Project> {
        self.state.lock().unwrap().projects.get(&id).cloned()
    }

    pub fn project_count(&self) -> usize {
        self.state.lock().unwrap().projects.len()
    }

    pub fn tags_of(&self, id: DbId) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .tags
            .iter()
            .filter(|(p, _)| *p == id)
            .map(|(_, t)| t.clone())
            .collect()
    }

    pub fn images_of(&self, id: DbId) -> Vec<ProjectImage> {
        let state = self.state.lock().unwrap();
        state.images.iter().filter(|i| i.project_id == id).cloned().collect()
    }

    pub fn files_of(&self, id: DbId) -> Vec<ProjectFile> {
        let state = self.state.lock().unwrap();
        state.files.iter().filter(|f| f.project_id == id).cloned().collect()
    }

    pub fn member(&self, id: DbId) -> Option<Member> {
        self.state.lock().unwrap().members.get(&id).cloned()
    }

    /// Insert a project directly, bypassing the call log.
    pub fn seed_project(&self, title: &str, thumbnail_url: Option<&str>) -> Project {
        let project = Project {
            id: Uuid::new_v4(),
            title: title.to_string(),
            summary: None,
            description: None,
            github_url: None,
            demo_url: None,
            team_id: None,
            thumbnail_url: thumbnail_url.map(str::to_string),
            created_at: Utc::now(),
        };
        self.state
            .lock()
            .unwrap()
            .projects
            .insert(project.id, project.clone());
        project
    }

    pub fn seed_tag(&self, project_id: DbId, tag: &str) {
        self.state
            .lock()
            .unwrap()
            .tags
            .push((project_id, tag.to_string()));
    }

    pub fn seed_image(&self, project_id: DbId, url: &str) -> ProjectImage {
        let image = ProjectImage {
            id: Uuid::new_v4(),
            project_id,
            image_url: url.to_string(),
            display_order: None,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().images.push(image.clone());
        image
    }

    pub fn seed_file(&self, project_id: DbId, name: &str, url: &str) -> ProjectFile {
        let file = ProjectFile {
            id: Uuid::new_v4(),
            project_id,
            file_name: name.to_string(),
            file_url: url.to_string(),
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().files.push(file.clone());
        file
    }

    pub fn seed_member(&self, name: &str) -> Member {
        let member = Member {
            id: Uuid::new_v4(),
            name: name.to_string(),
            affiliation: None,
            role: None,
            team_id: None,
            social_url: None,
            profile_image_url: None,
            created_at: Utc::now(),
        };
        self.state
            .lock()
            .unwrap()
            .members
            .insert(member.id, member.clone());
        member
    }

    /// Log the call and return the injected failure, if any.
    fn enter(&self, op: &'static str) -> Result<std::sync::MutexGuard<'_, StoreState>, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op.to_string());
        if state.failing.contains(op) {
            return Err(StoreError::Backend(format!("{op} refused")));
        }
        Ok(state)
    }
}

fn apply_fields(project: &mut Project, fields: &ProjectFields) {
    project.title = fields.title.clone();
    project.summary = fields.summary.clone();
    project.description = fields.description.clone();
    project.github_url = fields.github_url.clone();
    project.demo_url = fields.demo_url.clone();
    project.team_id = fields.team_id;
}

fn apply_member_fields(member: &mut Member, fields: &MemberFields) {
    member.name = fields.name.clone();
    member.affiliation = fields.affiliation.clone();
    member.role = fields.role.clone();
    member.team_id = fields.team_id;
    member.social_url = fields.social_url.clone();
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn insert_project(&self, fields: &ProjectFields) -> Result<Project, StoreError> {
        let mut state = self.enter("insert_project")?;
        let mut project = Project {
            id: Uuid::new_v4(),
            title: String::new(),
            summary: None,
            description: None,
            github_url: None,
            demo_url: None,
            team_id: None,
            thumbnail_url: None,
            created_at: Utc::now(),
        };
        apply_fields(&mut project, fields);
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: DbId,
        fields: &ProjectFields,
        clear_thumbnail: bool,
    ) -> Result<Option<Project>, StoreError> {
        let mut state = self.enter("update_project")?;
        Ok(state.projects.get_mut(&id).map(|project| {
            apply_fields(project, fields);
            if clear_thumbnail {
                project.thumbnail_url = None;
            }
            project.clone()
        }))
    }

    async fn set_thumbnail_url(&self, id: DbId, url: &str) -> Result<(), StoreError> {
        let mut state = self.enter("set_thumbnail_url")?;
        if state.deleted_before.contains("set_thumbnail_url") {
            state.projects.remove(&id);
        }
        match state.projects.get_mut(&id) {
            Some(project) => {
                project.thumbnail_url = Some(url.to_string());
                Ok(())
            }
            None => Err(StoreError::Backend(format!("project {id} no longer exists"))),
        }
    }

    async fn delete_project(&self, id: DbId) -> Result<bool, StoreError> {
        let mut state = self.enter("delete_project")?;
        Ok(state.projects.remove(&id).is_some())
    }

    async fn insert_images(
        &self,
        project_id: DbId,
        urls: &[String],
    ) -> Result<Vec<ProjectImage>, StoreError> {
        let mut state = self.enter("insert_images")?;
        let rows: Vec<ProjectImage> = urls
            .iter()
            .map(|url| ProjectImage {
                id: Uuid::new_v4(),
                project_id,
                image_url: url.clone(),
                display_order: None,
                created_at: Utc::now(),
            })
            .collect();
        state.images.extend(rows.iter().cloned());
        Ok(rows)
    }

    async fn find_image(&self, id: DbId) -> Result<Option<ProjectImage>, StoreError> {
        let state = self.enter("find_image")?;
        Ok(state.images.iter().find(|i| i.id == id).cloned())
    }

    async fn delete_image(&self, id: DbId) -> Result<bool, StoreError> {
        let mut state = self.enter("delete_image")?;
        let before = state.images.len();
        state.images.retain(|i| i.id != id);
        Ok(state.images.len() < before)
    }

    async fn delete_images_for_project(&self, project_id: DbId) -> Result<u64, StoreError> {
        let mut state = self.enter("delete_images_for_project")?;
        let before = state.images.len();
        state.images.retain(|i| i.project_id != project_id);
        Ok((before - state.images.len()) as u64)
    }

    async fn insert_tags(&self, project_id: DbId, tags: &[String]) -> Result<(), StoreError> {
        let mut state = self.enter("insert_tags")?;
        state
            .tags
            .extend(tags.iter().map(|t| (project_id, t.clone())));
        Ok(())
    }

    async fn delete_tags(&self, project_id: DbId) -> Result<(), StoreError> {
        let mut state = self.enter("delete_tags")?;
        state.tags.retain(|(p, _)| *p != project_id);
        Ok(())
    }

    async fn insert_file(&self, input: &CreateProjectFile) -> Result<ProjectFile, StoreError> {
        let mut state = self.enter("insert_file")?;
        if state.failing_file_rows.contains(&input.file_name) {
            return Err(StoreError::Backend(format!("{} refused", input.file_name)));
        }
        let row = ProjectFile {
            id: Uuid::new_v4(),
            project_id: input.project_id,
            file_name: input.file_name.clone(),
            file_url: input.file_url.clone(),
            created_at: Utc::now(),
        };
        state.files.push(row.clone());
        Ok(row)
    }

    async fn find_file(&self, id: DbId) -> Result<Option<ProjectFile>, StoreError> {
        let state = self.enter("find_file")?;
        Ok(state.files.iter().find(|f| f.id == id).cloned())
    }

    async fn delete_file(&self, id: DbId) -> Result<bool, StoreError> {
        let mut state = self.enter("delete_file")?;
        let before = state.files.len();
        state.files.retain(|f| f.id != id);
        Ok(state.files.len() < before)
    }

    async fn delete_files_for_project(&self, project_id: DbId) -> Result<u64, StoreError> {
        let mut state = self.enter("delete_files_for_project")?;
        let before = state.files.len();
        state.files.retain(|f| f.project_id != project_id);
        Ok((before - state.files.len()) as u64)
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    async fn insert_member(&self, fields: &MemberFields) -> Result<Member, StoreError> {
        let mut state = self.enter("insert_member")?;
        let mut member = Member {
            id: Uuid::new_v4(),
            name: String::new(),
            affiliation: None,
            role: None,
            team_id: None,
            social_url: None,
            profile_image_url: None,
            created_at: Utc::now(),
        };
        apply_member_fields(&mut member, fields);
        state.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn update_member(
        &self,
        id: DbId,
        fields: &MemberFields,
    ) -> Result<Option<Member>, StoreError> {
        let mut state = self.enter("update_member")?;
        Ok(state.members.get_mut(&id).map(|member| {
            apply_member_fields(member, fields);
            member.clone()
        }))
    }

    async fn set_profile_image_url(&self, id: DbId, url: &str) -> Result<(), StoreError> {
        let mut state = self.enter("set_profile_image_url")?;
        if state.deleted_before.contains("set_profile_image_url") {
            state.members.remove(&id);
        }
        match state.members.get_mut(&id) {
            Some(member) => {
                member.profile_image_url = Some(url.to_string());
                Ok(())
            }
            None => Err(StoreError::Backend(format!("member {id} no longer exists"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Object storage
// ---------------------------------------------------------------------------

/// One recorded upload.
#[derive(Debug, Clone)]
pub struct Upload {
    pub bucket: String,
    pub path: String,
    pub upsert: bool,
}

#[derive(Default)]
pub struct StorageState {
    pub objects: HashMap<(String, String), Vec<u8>>,
    pub uploads: Vec<Upload>,
    pub removals: Vec<(String, Vec<String>)>,
    /// Fail uploads whose path contains any of these fragments.
    failing_fragments: Vec<String>,
    fail_removals: bool,
}

#[derive(Default)]
pub struct MemoryStorage {
    pub state: Mutex<StorageState>,
}

impl MemoryStorage {
    pub fn fail_uploads_matching(&self, fragment: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_fragments
            .push(fragment.to_string());
    }

    pub fn fail_removals(&self) {
        self.state.lock().unwrap().fail_removals = true;
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub fn removals(&self) -> Vec<(String, Vec<String>)> {
        self.state.lock().unwrap().removals.clone()
    }

    pub fn object_count(&self) -> usize {
        self.state.lock().unwrap().objects.len()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        _content_type: Option<&str>,
        upsert: bool,
    ) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        state.uploads.push(Upload {
            bucket: bucket.to_string(),
            path: path.to_string(),
            upsert,
        });
        if state.failing_fragments.iter().any(|f| path.contains(f.as_str())) {
            return Err(StorageError::Backend(format!("upload of {path} refused")));
        }
        let key = (bucket.to_string(), path.to_string());
        if !upsert && state.objects.contains_key(&key) {
            return Err(StorageError::AlreadyExists {
                bucket: bucket.to_string(),
                path: path.to_string(),
            });
        }
        state.objects.insert(key, bytes.to_vec());
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        public_object_url(PUBLIC_BASE, bucket, path)
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        state.removals.push((bucket.to_string(), paths.to_vec()));
        if state.fail_removals {
            return Err(StorageError::Backend("remove refused".into()));
        }
        for path in paths {
            state.objects.remove(&(bucket.to_string(), path.clone()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingProgress {
    pub reports: Mutex<Vec<(ProgressStage, u8)>>,
}

impl RecordingProgress {
    pub fn for_stage(&self, stage: ProgressStage) -> Vec<u8> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == stage)
            .map(|(_, p)| *p)
            .collect()
    }
}

impl ProgressSink for RecordingProgress {
    fn report(&self, stage: ProgressStage, percent: u8) {
        self.reports.lock().unwrap().push((stage, percent));
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub storage: Arc<MemoryStorage>,
    pub progress: RecordingProgress,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::default()),
            storage: Arc::new(MemoryStorage::default()),
            progress: RecordingProgress::default(),
        }
    }

    pub fn projects(&self) -> ProjectUpsert {
        ProjectUpsert::new(self.store.clone(), self.storage.clone())
    }

    pub fn members(&self) -> MemberProfiles {
        MemberProfiles::new(self.store.clone(), self.storage.clone())
    }
}

pub fn png(name: &str, size: usize) -> IncomingFile {
    IncomingFile::new(name, Some("image/png".to_string()), vec![7u8; size])
}

pub fn pdf(name: &str) -> IncomingFile {
    IncomingFile::new(name, Some("application/pdf".to_string()), vec![1, 2, 3])
}

pub fn public_url(bucket: &str, path: &str) -> String {
    public_object_url(PUBLIC_BASE, bucket, path)
}
