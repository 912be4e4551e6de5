//! Outcome notifications.

use async_trait::async_trait;

use super::record::ReviewNotice;
use crate::types::BoxError;

/// Receives one call per workflow transition.
///
/// Calls are best-effort: the engine logs an `Err` and carries on, so an
/// implementation should never be the only record of a transition.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A record entered the queue and is waiting for a moderator.
    async fn notify_new_submission(&self, notice: &ReviewNotice) -> Result<(), BoxError>;

    /// A record was approved, either by review or automatically.
    async fn notify_approved(&self, notice: &ReviewNotice) -> Result<(), BoxError>;

    /// A record was rejected with the reviewer's notes.
    async fn notify_rejected(&self, notice: &ReviewNotice, notes: &str) -> Result<(), BoxError>;
}
