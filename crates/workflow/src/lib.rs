//! Multi-step write workflows against the store and object storage.
//!
//! The store offers no transaction spanning a project and its child records,
//! so each workflow runs a fixed sequence of remote calls and decides per step
//! whether a failure aborts the operation or is downgraded to a warning.
//! Nothing is retried and earlier successful steps are never rolled back.

pub mod error;
pub mod member;
pub mod project;
pub mod store;

pub use error::{StepError, StoreError, WorkflowError};
pub use member::{MemberOutcome, MemberProfiles, MemberSubmission};
pub use project::{ProjectSubmission, ProjectUpsert, UpsertOutcome};
pub use store::{MemberStore, PgStore, ProjectStore};
