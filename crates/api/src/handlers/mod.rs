//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Simple reads call the repositories in `showcase_db` directly; multi-step
//! writes go through the workflows in `showcase_workflow`. Errors are mapped
//! via [`crate::error::AppError`].

pub mod auth;
pub mod dashboard;
pub mod form;
pub mod gallery;
pub mod members;
pub mod projects;
pub mod teams;
