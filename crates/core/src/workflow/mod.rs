//! Moderation and crowd-sourced edit workflow.
//!
//! - [`WorkflowEngine`] -- the submit / approve / reject state machine.
//! - [`ReviewStore`] -- persistence for submissions and edit proposals.
//! - [`EntityMutator`] / [`MutatorRegistry`] -- per-type entity writes.
//! - [`Notifier`] -- best-effort outcome notifications.

pub mod engine;
pub mod error;
pub mod item;
pub mod mutator;
pub mod notifier;
pub mod record;
pub mod store;

pub use engine::{SubmitOutcome, SubmitRequest, WorkflowEngine};
pub use error::WorkflowError;
pub use item::{ItemType, RecordKind, ReviewStatus};
pub use mutator::{EntityMutator, EntitySummary, MutatorRegistry};
pub use notifier::Notifier;
pub use record::{Mutation, NewRecord, RecordFilter, ReviewNotice, ReviewRecord, StatusChange};
pub use store::ReviewStore;
