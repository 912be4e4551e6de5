//! The record abstraction shared by submissions and edit proposals.

use serde::{Deserialize, Serialize};

use super::item::{ItemType, RecordKind, ReviewStatus};
use crate::types::{DbId, FieldMap};

/// What approving a record does to its target entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mutation<'a> {
    /// Apply a partial field update (edit proposals).
    Apply(&'a FieldMap),
    /// Flip the entity's own status from pending to approved (submissions).
    Activate,
}

/// Read access to a stored submission or edit proposal.
///
/// Implemented by the persisted row types so the engine can run the same
/// state machine over both queues.
pub trait ReviewRecord: Send + Sync {
    fn id(&self) -> DbId;
    fn item_type(&self) -> ItemType;
    fn item_id(&self) -> DbId;
    fn status(&self) -> ReviewStatus;
    /// The submitting or proposing user.
    fn author_id(&self) -> DbId;
    fn moderator_notes(&self) -> Option<&str>;
    /// The entity mutation performed when this record is approved.
    fn approval_mutation(&self) -> Mutation<'_>;
}

/// Insert payload handed to [`ReviewStore::create`](super::ReviewStore::create).
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub item_type: ItemType,
    pub item_id: DbId,
    pub author_id: DbId,
    /// Submission payload or proposed changes.
    pub fields: FieldMap,
    /// Snapshot of the entity at proposal time. Submissions leave this empty.
    pub current_values: Option<FieldMap>,
    pub status: ReviewStatus,
    /// Set when the record is created already approved.
    pub reviewed_by: Option<DbId>,
}

/// A transition out of pending, handed to
/// [`ReviewStore::update_status`](super::ReviewStore::update_status).
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub id: DbId,
    pub status: ReviewStatus,
    pub reviewer_id: DbId,
    pub notes: Option<String>,
}

/// Conjunctive list filter. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecordFilter {
    pub status: Option<ReviewStatus>,
    pub item_type: Option<ItemType>,
}

impl RecordFilter {
    pub fn matches<R: ReviewRecord + ?Sized>(&self, record: &R) -> bool {
        self.status.map_or(true, |s| s == record.status())
            && self.item_type.map_or(true, |t| t == record.item_type())
    }
}

/// Everything a notifier needs to know about a transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewNotice {
    pub kind: RecordKind,
    pub record_id: DbId,
    pub item_type: ItemType,
    pub item_id: DbId,
    pub author_id: DbId,
    pub status: ReviewStatus,
    /// True when the record never waited in the queue.
    pub auto_approved: bool,
}

impl ReviewNotice {
    pub fn from_record<R: ReviewRecord + ?Sized>(kind: RecordKind, record: &R) -> Self {
        Self {
            kind,
            record_id: record.id(),
            item_type: record.item_type(),
            item_id: record.item_id(),
            author_id: record.author_id(),
            status: record.status(),
            auto_approved: false,
        }
    }
}
