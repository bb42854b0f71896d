//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Input structs for inserts and updates, already normalised by the caller
//! - Typed join rows where a query pulls in the owning team's name

pub mod admin_user;
pub mod dashboard;
pub mod member;
pub mod project;
pub mod project_file;
pub mod project_image;
pub mod project_tag;
pub mod team;
