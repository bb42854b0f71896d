//! Admin account role names stored in `admin_users.role`.

/// Full back-office access. Assigned to new admin accounts by default.
pub const ROLE_ADMIN: &str = "admin";
