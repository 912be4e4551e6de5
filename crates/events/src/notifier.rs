//! Bridges the workflow engine's [`Notifier`] seam onto the [`EventBus`].

use std::sync::Arc;

use async_trait::async_trait;
use curator_core::types::BoxError;
use curator_core::workflow::{Notifier, ReviewNotice};

use crate::bus::{EventBus, ReviewEvent, ReviewEventKind};

/// [`Notifier`] that publishes a [`ReviewEvent`] per transition.
///
/// Publishing with no subscriber is reported as an error; the engine logs
/// it and carries on.
#[derive(Clone)]
pub struct EventBusNotifier {
    bus: Arc<EventBus>,
}

impl EventBusNotifier {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self { bus }
    }

    fn send(&self, event: ReviewEvent) -> Result<(), BoxError> {
        let event_type = event.event_type();
        let record_id = event.notice.record_id;
        let receivers = self.bus.publish(event)?;
        tracing::debug!(event_type, record_id, receivers, "Published review event");
        Ok(())
    }
}

#[async_trait]
impl Notifier for EventBusNotifier {
    async fn notify_new_submission(&self, notice: &ReviewNotice) -> Result<(), BoxError> {
        self.send(ReviewEvent::new(ReviewEventKind::Submitted, notice.clone()))
    }

    async fn notify_approved(&self, notice: &ReviewNotice) -> Result<(), BoxError> {
        self.send(ReviewEvent::new(ReviewEventKind::Approved, notice.clone()))
    }

    async fn notify_rejected(&self, notice: &ReviewNotice, notes: &str) -> Result<(), BoxError> {
        self.send(ReviewEvent::new(ReviewEventKind::Rejected, notice.clone()).with_notes(notes))
    }
}
