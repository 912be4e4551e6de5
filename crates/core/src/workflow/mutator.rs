//! Entity mutation capability and per-type dispatch.
//!
//! Each directory entity kind registers one [`EntityMutator`]. The engine
//! never branches on the item type itself; it asks the
//! [`MutatorRegistry`] for the implementation that owns the tag.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use super::error::WorkflowError;
use super::item::ItemType;
use crate::types::{BoxError, DbId, FieldMap};

/// Minimal view of an entity after a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub item_type: ItemType,
    pub id: DbId,
    pub status: String,
}

/// Field-level writes against one entity table.
#[async_trait]
pub trait EntityMutator: Send + Sync {
    /// The item type this mutator owns.
    fn item_type(&self) -> ItemType;

    /// Fields a submission or proposal may set.
    fn writable_fields(&self) -> &'static [&'static str];

    /// Fields a new entity cannot be created without.
    fn required_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Check value types and constraints of submitted fields without
    /// touching storage. The error text is shown to the client.
    fn validate_fields(&self, _fields: &FieldMap) -> Result<(), BoxError> {
        Ok(())
    }

    /// Lifecycle status of the entity (`pending`, `approved`, `rejected`),
    /// or `None` when no such row exists.
    async fn status_of(&self, item_id: DbId) -> Result<Option<String>, BoxError>;

    /// Partial update: only keys present in `changes` are written.
    async fn apply(&self, item_id: DbId, changes: &FieldMap) -> Result<EntitySummary, BoxError>;

    /// Flip the entity's status from pending to approved.
    async fn activate(&self, item_id: DbId) -> Result<EntitySummary, BoxError>;

    /// Insert a new entity in pending state from submitted fields.
    async fn create_pending(
        &self,
        author_id: DbId,
        fields: &FieldMap,
    ) -> Result<EntitySummary, BoxError>;
}

/// Item-type keyed set of [`EntityMutator`]s.
#[derive(Clone, Default)]
pub struct MutatorRegistry {
    mutators: HashMap<ItemType, Arc<dyn EntityMutator>>,
}

impl MutatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mutator under its own item type, replacing any previous one.
    pub fn with(mut self, mutator: Arc<dyn EntityMutator>) -> Self {
        self.mutators.insert(mutator.item_type(), mutator);
        self
    }

    pub fn get(&self, item_type: ItemType) -> Result<&Arc<dyn EntityMutator>, WorkflowError> {
        self.mutators
            .get(&item_type)
            .ok_or(WorkflowError::UnsupportedEntityType(item_type))
    }

    /// Reject keys that the target entity does not allow to be written.
    pub fn check_writable(&self, item_type: ItemType, fields: &FieldMap) -> Result<(), WorkflowError> {
        let writable = self.get(item_type)?.writable_fields();
        let mut unknown: Vec<&str> = fields
            .keys()
            .map(String::as_str)
            .filter(|k| !writable.contains(k))
            .collect();
        if unknown.is_empty() {
            return Ok(());
        }
        unknown.sort_unstable();
        Err(WorkflowError::Validation(format!(
            "Fields not writable on {item_type}: {}. Allowed: {}",
            unknown.join(", "),
            writable.join(", ")
        )))
    }

    /// Field names first, then value types and constraints.
    pub fn validate_fields(&self, item_type: ItemType, fields: &FieldMap) -> Result<(), WorkflowError> {
        self.check_writable(item_type, fields)?;
        self.get(item_type)?
            .validate_fields(fields)
            .map_err(|e| WorkflowError::Validation(e.to_string()))
    }

    /// Create a brand-new pending entity for a submission.
    pub async fn create_pending(
        &self,
        item_type: ItemType,
        author_id: DbId,
        fields: &FieldMap,
    ) -> Result<EntitySummary, WorkflowError> {
        self.validate_fields(item_type, fields)?;
        let mutator = self.get(item_type)?;
        let missing: Vec<&str> = mutator
            .required_fields()
            .iter()
            .copied()
            .filter(|f| fields.get(*f).map_or(true, |v| v.is_null()))
            .collect();
        if !missing.is_empty() {
            return Err(WorkflowError::Validation(format!(
                "Missing required fields for {item_type}: {}",
                missing.join(", ")
            )));
        }
        mutator
            .create_pending(author_id, fields)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, item_type = %item_type, "Failed to create pending entity");
                WorkflowError::ApplyChanges {
                    record_id: None,
                    item_type,
                    item_id: None,
                }
            })
    }
}

impl fmt::Debug for MutatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self.mutators.keys().map(|t| t.as_str()).collect();
        types.sort_unstable();
        f.debug_struct("MutatorRegistry").field("types", &types).finish()
    }
}
