//! Lifecycle status values for directory entity rows.

/// Newly created, not publicly visible.
pub const ENTITY_STATUS_PENDING: &str = "pending";

/// Visible in the directory.
pub const ENTITY_STATUS_APPROVED: &str = "approved";
