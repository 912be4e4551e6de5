//! Review-event to in-app notification routing.

use curator_core::roles::{ROLE_ADMIN, ROLE_MODERATOR};
use curator_core::types::{BoxError, DbId};
use curator_core::workflow::{RecordKind, ReviewNotice};
use curator_db::models::notification::CreateNotification;
use curator_db::repositories::{NotificationRepo, UserRepo};
use curator_db::DbPool;
use curator_events::{ReviewEvent, ReviewEventKind};
use tokio::sync::broadcast;

/// Who receives a notification for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// Every active moderator and admin except `exclude`.
    Reviewers { exclude: DbId },
    /// A single user, normally the record's author.
    User(DbId),
}

impl Audience {
    pub fn for_event(event: &ReviewEvent) -> Self {
        match event.kind {
            ReviewEventKind::Submitted => Audience::Reviewers {
                exclude: event.notice.author_id,
            },
            ReviewEventKind::Approved | ReviewEventKind::Rejected => {
                Audience::User(event.notice.author_id)
            }
        }
    }
}

/// Title and body shown to the recipient.
pub fn compose(event: &ReviewEvent) -> (String, String) {
    let notice = &event.notice;
    let what = describe(notice);
    match event.kind {
        ReviewEventKind::Submitted => (
            format!("New {} awaiting review", label(notice.kind)),
            format!("A new {what} is waiting in the moderation queue."),
        ),
        ReviewEventKind::Approved if notice.auto_approved => (
            format!("{} published", capitalized(notice.kind)),
            format!("Your {what} was approved automatically and is now live."),
        ),
        ReviewEventKind::Approved => (
            format!("{} approved", capitalized(notice.kind)),
            format!("Your {what} was approved and is now live."),
        ),
        ReviewEventKind::Rejected => (
            format!("{} rejected", capitalized(notice.kind)),
            match event.notes.as_deref() {
                Some(notes) => format!("Your {what} was rejected. Moderator notes: {notes}"),
                None => format!("Your {what} was rejected."),
            },
        ),
    }
}

fn label(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Submission => "submission",
        RecordKind::EditProposal => "edit proposal",
    }
}

fn capitalized(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Submission => "Submission",
        RecordKind::EditProposal => "Edit proposal",
    }
}

fn describe(notice: &ReviewNotice) -> String {
    format!(
        "{} for {} #{}",
        label(notice.kind),
        notice.item_type,
        notice.item_id
    )
}

/// Persists in-app notifications for review events.
pub struct NotificationRouter {
    pool: DbPool,
}

impl NotificationRouter {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Consume events until the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<ReviewEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = event.event_type(),
                            record_id = event.notice.record_id,
                            "Failed to route review event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    async fn route_event(&self, event: &ReviewEvent) -> Result<(), BoxError> {
        let recipients = self.resolve(Audience::for_event(event)).await?;
        let (title, message) = compose(event);

        for user_id in &recipients {
            let input = CreateNotification {
                user_id: *user_id,
                event_type: event.event_type().to_string(),
                title: title.clone(),
                message: message.clone(),
                record_kind: event.notice.kind.as_str().to_string(),
                record_id: event.notice.record_id,
            };
            NotificationRepo::create(&self.pool, &input).await?;
        }

        tracing::debug!(
            event_type = event.event_type(),
            record_id = event.notice.record_id,
            recipients = recipients.len(),
            "Stored in-app notifications"
        );
        Ok(())
    }

    async fn resolve(&self, audience: Audience) -> Result<Vec<DbId>, sqlx::Error> {
        match audience {
            Audience::User(id) => Ok(vec![id]),
            Audience::Reviewers { exclude } => {
                let roles = [ROLE_ADMIN.to_string(), ROLE_MODERATOR.to_string()];
                let ids = UserRepo::list_active_ids_with_roles(&self.pool, &roles).await?;
                Ok(ids.into_iter().filter(|id| *id != exclude).collect())
            }
        }
    }
}
