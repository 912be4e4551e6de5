use std::sync::Arc;

use curator_core::roles::RoleResolver;
use curator_core::workflow::{MutatorRegistry, RecordKind, ReviewStore, WorkflowEngine};
use curator_db::models::edit_proposal::EditProposal;
use curator_db::models::submission::Submission;
use curator_events::{EventBus, EventBusNotifier};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub pool: curator_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Engine over the moderation queue.
    pub submissions: Arc<WorkflowEngine<Submission>>,
    /// Engine over edit proposals.
    pub edit_proposals: Arc<WorkflowEngine<EditProposal>>,
    /// Entity mutators, used directly to insert new pending entities.
    pub mutators: Arc<MutatorRegistry>,
    pub event_bus: Arc<EventBus>,
}

/// Collaborators the two workflow engines are built from.
pub struct WorkflowParts {
    pub submission_store: Arc<dyn ReviewStore<Record = Submission>>,
    pub proposal_store: Arc<dyn ReviewStore<Record = EditProposal>>,
    pub roles: Arc<dyn RoleResolver>,
    pub mutators: Arc<MutatorRegistry>,
}

impl AppState {
    /// Wire both engines to the same role resolver, mutators, and event bus.
    pub fn new(
        pool: curator_db::DbPool,
        config: Arc<ServerConfig>,
        parts: WorkflowParts,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let notifier = Arc::new(EventBusNotifier::new(Arc::clone(&event_bus)));

        let submissions = WorkflowEngine::new(
            RecordKind::Submission,
            parts.submission_store,
            Arc::clone(&parts.roles),
            Arc::clone(&parts.mutators),
            notifier.clone(),
        );
        let edit_proposals = WorkflowEngine::new(
            RecordKind::EditProposal,
            parts.proposal_store,
            parts.roles,
            Arc::clone(&parts.mutators),
            notifier,
        );

        Self {
            pool,
            config,
            submissions: Arc::new(submissions),
            edit_proposals: Arc::new(edit_proposals),
            mutators: parts.mutators,
            event_bus,
        }
    }

    /// Postgres-backed collaborators for production.
    pub fn postgres_parts(pool: &curator_db::DbPool) -> WorkflowParts {
        use curator_db::repositories::{
            pg_mutator_registry, PgEditProposalStore, PgRoleResolver, PgSubmissionStore,
        };

        WorkflowParts {
            submission_store: Arc::new(PgSubmissionStore::new(pool.clone())),
            proposal_store: Arc::new(PgEditProposalStore::new(pool.clone())),
            roles: Arc::new(PgRoleResolver::new(pool.clone())),
            mutators: Arc::new(pg_mutator_registry(pool)),
        }
    }
}
