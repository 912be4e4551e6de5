//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. The `Pg*` adapters wrap a
//! pool and implement the workflow traits from `curator_core`.

pub mod comment_repo;
pub mod edit_proposal_repo;
pub mod employee_repo;
pub mod establishment_repo;
pub mod notification_repo;
pub mod submission_repo;
pub mod user_repo;

pub use comment_repo::{CommentMutator, CommentRepo};
pub use edit_proposal_repo::{EditProposalRepo, PgEditProposalStore};
pub use employee_repo::{EmployeeMutator, EmployeeRepo};
pub use establishment_repo::{EstablishmentMutator, EstablishmentRepo};
pub use notification_repo::NotificationRepo;
pub use submission_repo::{PgSubmissionStore, SubmissionRepo};
pub use user_repo::{PgRoleResolver, UserRepo};

use std::sync::Arc;

use curator_core::workflow::MutatorRegistry;
use sqlx::PgPool;

/// Registry with a Postgres mutator for every directory entity type.
pub fn pg_mutator_registry(pool: &PgPool) -> MutatorRegistry {
    MutatorRegistry::new()
        .with(Arc::new(EmployeeMutator::new(pool.clone())))
        .with(Arc::new(EstablishmentMutator::new(pool.clone())))
        .with(Arc::new(CommentMutator::new(pool.clone())))
}
