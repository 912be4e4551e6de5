//! The moderation state machine.
//!
//! One [`WorkflowEngine`] instance drives one queue (submissions or edit
//! proposals). Every operation is request-scoped and strictly sequential:
//! each step runs only after the previous one succeeded.
//!
//! ```text
//!            submit (user)                approve
//!   (none) ──────────────▶ pending ─────────────────▶ approved
//!      │                      │
//!      │ submit (moderator,   │ reject (notes required)
//!      │ admin)               ▼
//!      └──────────────▶ approved        rejected
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::WorkflowError;
use super::item::{ItemType, RecordKind, ReviewStatus};
use super::mutator::{EntitySummary, MutatorRegistry};
use super::notifier::Notifier;
use super::record::{Mutation, NewRecord, RecordFilter, ReviewNotice, ReviewRecord, StatusChange};
use super::store::ReviewStore;
use crate::roles::{Role, RoleResolver};
use crate::types::{DbId, FieldMap};

/// Input to [`WorkflowEngine::submit`].
///
/// Everything is optional at this level so missing fields surface as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitRequest {
    pub item_type: Option<String>,
    pub item_id: Option<DbId>,
    /// Submissions may send this as `payload`.
    #[serde(alias = "payload")]
    pub proposed_changes: Option<FieldMap>,
    pub current_values: Option<FieldMap>,
}

/// Result of a successful submit.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome<R> {
    pub record: R,
    pub auto_approved: bool,
}

/// Validated form of a [`SubmitRequest`].
struct ValidSubmit {
    item_type: ItemType,
    item_id: DbId,
    fields: FieldMap,
    current_values: Option<FieldMap>,
}

/// Orchestrates role lookup, store writes, entity mutation, and
/// notifications for one queue.
pub struct WorkflowEngine<R: ReviewRecord + 'static> {
    kind: RecordKind,
    store: Arc<dyn ReviewStore<Record = R>>,
    roles: Arc<dyn RoleResolver>,
    mutators: Arc<MutatorRegistry>,
    notifier: Arc<dyn Notifier>,
}

impl<R: ReviewRecord + 'static> WorkflowEngine<R> {
    pub fn new(
        kind: RecordKind,
        store: Arc<dyn ReviewStore<Record = R>>,
        roles: Arc<dyn RoleResolver>,
        mutators: Arc<MutatorRegistry>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            kind,
            store,
            roles,
            mutators,
            notifier,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    // ── Submit ────────────────────────────────────────────────────────

    /// Queue a new record, or approve it on the spot when the actor is a
    /// moderator or admin.
    pub async fn submit(
        &self,
        actor_id: DbId,
        request: SubmitRequest,
    ) -> Result<SubmitOutcome<R>, WorkflowError> {
        let input = self.validate_submit(request)?;

        let role = self.resolve_role(actor_id).await?;

        self.check_target(input.item_type, input.item_id).await?;

        let auto_approved = role.is_privileged();
        let new_record = NewRecord {
            item_type: input.item_type,
            item_id: input.item_id,
            author_id: actor_id,
            fields: input.fields,
            current_values: input.current_values,
            status: if auto_approved {
                ReviewStatus::Approved
            } else {
                ReviewStatus::Pending
            },
            reviewed_by: auto_approved.then_some(actor_id),
        };

        let record = self.store.create(&new_record).await.map_err(|e| {
            tracing::error!(
                error = %e,
                kind = %self.kind,
                item_type = %new_record.item_type,
                item_id = new_record.item_id,
                "Failed to create record"
            );
            WorkflowError::Create {
                entity: self.kind.entity_name(),
            }
        })?;

        if auto_approved {
            self.apply_mutation(&record).await?;

            tracing::info!(
                kind = %self.kind,
                record_id = record.id(),
                actor_id,
                role = %role,
                item_type = %record.item_type(),
                item_id = record.item_id(),
                "Auto-approved"
            );

            let mut notice = ReviewNotice::from_record(self.kind, &record);
            notice.auto_approved = true;
            self.dispatch(Dispatch::Approved(&notice)).await;
        } else {
            tracing::info!(
                kind = %self.kind,
                record_id = record.id(),
                actor_id,
                item_type = %record.item_type(),
                item_id = record.item_id(),
                "Queued for review"
            );

            let notice = ReviewNotice::from_record(self.kind, &record);
            self.dispatch(Dispatch::NewSubmission(&notice)).await;
        }

        Ok(SubmitOutcome {
            record,
            auto_approved,
        })
    }

    // ── Review ────────────────────────────────────────────────────────

    /// Approve a pending record: mutate the target entity, then mark the
    /// record approved.
    pub async fn approve(
        &self,
        reviewer_id: DbId,
        record_id: DbId,
        notes: Option<String>,
    ) -> Result<R, WorkflowError> {
        let record = self.fetch_pending(record_id).await?;

        self.apply_mutation(&record).await?;

        let change = StatusChange {
            id: record_id,
            status: ReviewStatus::Approved,
            reviewer_id,
            notes: normalize_notes(notes),
        };
        let updated = match self.store.update_status(&change).await {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                tracing::error!(
                    kind = %self.kind,
                    record_id,
                    item_type = %record.item_type(),
                    item_id = record.item_id(),
                    "Entity mutated but record left pending by a concurrent review; needs reconciliation"
                );
                return Err(self.status_update_error(&record));
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    kind = %self.kind,
                    record_id,
                    item_type = %record.item_type(),
                    item_id = record.item_id(),
                    "Entity mutated but status update failed; needs reconciliation"
                );
                return Err(self.status_update_error(&record));
            }
        };

        tracing::info!(
            kind = %self.kind,
            record_id,
            reviewer_id,
            item_type = %updated.item_type(),
            item_id = updated.item_id(),
            "Approved"
        );

        let notice = ReviewNotice::from_record(self.kind, &updated);
        self.dispatch(Dispatch::Approved(&notice)).await;

        Ok(updated)
    }

    /// Reject a pending record. The target entity is never touched.
    pub async fn reject(
        &self,
        reviewer_id: DbId,
        record_id: DbId,
        notes: Option<String>,
    ) -> Result<R, WorkflowError> {
        let notes = normalize_notes(notes).ok_or_else(|| {
            WorkflowError::Validation("Notes are required when rejecting".to_string())
        })?;

        let record = self.fetch_pending(record_id).await?;

        let change = StatusChange {
            id: record_id,
            status: ReviewStatus::Rejected,
            reviewer_id,
            notes: Some(notes.clone()),
        };
        let updated = match self.store.update_status(&change).await {
            Ok(Some(updated)) => updated,
            // Nothing was mutated, so losing the race is a plain double review.
            Ok(None) => {
                return Err(WorkflowError::AlreadyReviewed {
                    id: record_id,
                    status: None,
                })
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    kind = %self.kind,
                    record_id,
                    "Failed to mark record rejected"
                );
                return Err(self.status_update_error(&record));
            }
        };

        tracing::info!(
            kind = %self.kind,
            record_id,
            reviewer_id,
            item_type = %updated.item_type(),
            item_id = updated.item_id(),
            "Rejected"
        );

        let notice = ReviewNotice::from_record(self.kind, &updated);
        self.dispatch(Dispatch::Rejected(&notice, &notes)).await;

        Ok(updated)
    }

    // ── Queries ───────────────────────────────────────────────────────

    /// All records matching every supplied filter, newest first.
    pub async fn list(&self, filter: &RecordFilter) -> Result<Vec<R>, WorkflowError> {
        self.store.list(filter).await.map_err(|e| {
            tracing::error!(error = %e, kind = %self.kind, ?filter, "Failed to list records");
            WorkflowError::Fetch {
                entity: self.kind.entity_name(),
            }
        })
    }

    /// Records authored by `actor_id`, newest first.
    pub async fn list_mine(&self, actor_id: DbId) -> Result<Vec<R>, WorkflowError> {
        self.store.list_by_actor(actor_id).await.map_err(|e| {
            tracing::error!(error = %e, kind = %self.kind, actor_id, "Failed to list own records");
            WorkflowError::Fetch {
                entity: self.kind.entity_name(),
            }
        })
    }

    // ── Steps ─────────────────────────────────────────────────────────

    fn validate_submit(&self, request: SubmitRequest) -> Result<ValidSubmit, WorkflowError> {
        let raw_type = request
            .item_type
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| WorkflowError::Validation("item_type is required".to_string()))?;
        let item_type: ItemType = raw_type
            .parse()
            .map_err(|e: crate::error::ParseEnumError| WorkflowError::Validation(e.to_string()))?;
        if !self.kind.accepts(item_type) {
            return Err(WorkflowError::Validation(format!(
                "{item_type} items cannot be submitted as {}",
                self.kind
            )));
        }

        let item_id = request
            .item_id
            .ok_or_else(|| WorkflowError::Validation("item_id is required".to_string()))?;

        let fields = request
            .proposed_changes
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                WorkflowError::Validation("proposed_changes must be a non-empty object".to_string())
            })?;
        self.mutators.validate_fields(item_type, &fields)?;

        let current_values = match self.kind {
            RecordKind::EditProposal => request.current_values,
            RecordKind::Submission => None,
        };

        Ok(ValidSubmit {
            item_type,
            item_id,
            fields,
            current_values,
        })
    }

    async fn resolve_role(&self, actor_id: DbId) -> Result<Role, WorkflowError> {
        match self.roles.get_role(actor_id).await {
            Ok(Some(role)) => Ok(role),
            Ok(None) => {
                tracing::error!(actor_id, "No role found for actor");
                Err(WorkflowError::RoleLookup { user_id: actor_id })
            }
            Err(e) => {
                tracing::error!(error = %e, actor_id, "Role lookup failed");
                Err(WorkflowError::RoleLookup { user_id: actor_id })
            }
        }
    }

    /// The target must exist; edit proposals may only target approved
    /// entities.
    async fn check_target(&self, item_type: ItemType, item_id: DbId) -> Result<(), WorkflowError> {
        let status = self
            .mutators
            .get(item_type)?
            .status_of(item_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, item_type = %item_type, item_id, "Target lookup failed");
                WorkflowError::Fetch {
                    entity: entity_label(item_type),
                }
            })?
            .ok_or(WorkflowError::NotFound {
                entity: entity_label(item_type),
                id: item_id,
            })?;

        if self.kind == RecordKind::EditProposal && status != ReviewStatus::Approved.as_str() {
            return Err(WorkflowError::Validation(format!(
                "{} {item_id} is {status}; only approved entries accept edits",
                entity_label(item_type)
            )));
        }
        Ok(())
    }

    /// Load a record and enforce the pending guard.
    async fn fetch_pending(&self, record_id: DbId) -> Result<R, WorkflowError> {
        let record = self
            .store
            .get_by_id(record_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, kind = %self.kind, record_id, "Failed to fetch record");
                WorkflowError::Fetch {
                    entity: self.kind.entity_name(),
                }
            })?
            .ok_or(WorkflowError::NotFound {
                entity: self.kind.entity_name(),
                id: record_id,
            })?;

        if record.status() != ReviewStatus::Pending {
            tracing::warn!(
                kind = %self.kind,
                record_id,
                status = %record.status(),
                "Review attempted on a record that is no longer pending"
            );
            return Err(WorkflowError::AlreadyReviewed {
                id: record_id,
                status: Some(record.status()),
            });
        }
        Ok(record)
    }

    /// Run the record's approval mutation: exactly one mutator call.
    async fn apply_mutation(&self, record: &R) -> Result<EntitySummary, WorkflowError> {
        let item_type = record.item_type();
        let item_id = record.item_id();
        let mutator = self.mutators.get(item_type)?;

        let result = match record.approval_mutation() {
            Mutation::Apply(changes) => mutator.apply(item_id, changes).await,
            Mutation::Activate => mutator.activate(item_id).await,
        };

        result.map_err(|e| {
            let stored_approved = record.status() != ReviewStatus::Pending;
            if !stored_approved {
                tracing::error!(
                    error = %e,
                    kind = %self.kind,
                    record_id = record.id(),
                    item_type = %item_type,
                    item_id,
                    "Failed to apply changes; record left pending"
                );
            } else {
                tracing::error!(
                    error = %e,
                    kind = %self.kind,
                    record_id = record.id(),
                    item_type = %item_type,
                    item_id,
                    "Record stored as approved but entity mutation failed; needs reconciliation"
                );
            }
            WorkflowError::ApplyChanges {
                record_id: stored_approved.then_some(record.id()),
                item_type,
                item_id: Some(item_id),
            }
        })
    }

    fn status_update_error(&self, record: &R) -> WorkflowError {
        WorkflowError::StatusUpdate {
            record_id: record.id(),
            item_type: record.item_type(),
            item_id: record.item_id(),
        }
    }

    /// Fire a notification and log, never propagate, a failure.
    async fn dispatch(&self, what: Dispatch<'_>) {
        let (event, notice, result) = match what {
            Dispatch::NewSubmission(n) => ("submitted", n, self.notifier.notify_new_submission(n).await),
            Dispatch::Approved(n) => ("approved", n, self.notifier.notify_approved(n).await),
            Dispatch::Rejected(n, notes) => ("rejected", n, self.notifier.notify_rejected(n, notes).await),
        };
        if let Err(e) = result {
            tracing::warn!(
                error = %e,
                event,
                kind = %notice.kind,
                record_id = notice.record_id,
                "Notification dispatch failed"
            );
        }
    }
}

enum Dispatch<'a> {
    NewSubmission(&'a ReviewNotice),
    Approved(&'a ReviewNotice),
    Rejected(&'a ReviewNotice, &'a str),
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

fn entity_label(item_type: ItemType) -> &'static str {
    match item_type {
        ItemType::Employee => "Employee",
        ItemType::Establishment => "Establishment",
        ItemType::Comment => "Comment",
    }
}
