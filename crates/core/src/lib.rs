//! Curator domain core.
//!
//! Holds the shared primitive types, the role model, and the moderation
//! workflow engine together with the collaborator traits it drives.
//! Nothing in here touches the database or HTTP directly.

pub mod error;
pub mod roles;
pub mod types;
pub mod workflow;
