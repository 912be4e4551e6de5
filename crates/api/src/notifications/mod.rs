//! In-app notification fan-out.
//!
//! The [`NotificationRouter`] subscribes to the event bus and persists one
//! notification row per recipient of each moderation transition.

pub mod router;

pub use router::NotificationRouter;
