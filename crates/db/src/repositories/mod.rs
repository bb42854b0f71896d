//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_user_repo;
pub mod dashboard_repo;
pub mod member_repo;
pub mod project_file_repo;
pub mod project_image_repo;
pub mod project_repo;
pub mod project_tag_repo;
pub mod team_repo;

pub use admin_user_repo::AdminUserRepo;
pub use dashboard_repo::DashboardRepo;
pub use member_repo::MemberRepo;
pub use project_file_repo::ProjectFileRepo;
pub use project_image_repo::ProjectImageRepo;
pub use project_repo::ProjectRepo;
pub use project_tag_repo::ProjectTagRepo;
pub use team_repo::TeamRepo;
