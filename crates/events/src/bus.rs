//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` across the application. The
//! API's notification router is its main subscriber.

use chrono::{DateTime, Utc};
use curator_core::workflow::ReviewNotice;
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ReviewEvent
// ---------------------------------------------------------------------------

/// Which transition a [`ReviewEvent`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewEventKind {
    /// A record entered the queue, or was auto-approved on entry.
    Submitted,
    Approved,
    Rejected,
}

impl ReviewEventKind {
    /// Dot-separated event name, e.g. `"review.approved"`.
    pub fn event_type(self) -> &'static str {
        match self {
            Self::Submitted => "review.submitted",
            Self::Approved => "review.approved",
            Self::Rejected => "review.rejected",
        }
    }
}

/// A moderation transition published on the bus.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewEvent {
    pub kind: ReviewEventKind,
    pub notice: ReviewNotice,
    /// Reviewer notes. Only rejections carry them.
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl ReviewEvent {
    pub fn new(kind: ReviewEventKind, notice: ReviewNotice) -> Self {
        Self {
            kind,
            notice,
            notes: None,
            occurred_at: Utc::now(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// Publishing found nobody listening.
#[derive(Debug, thiserror::Error)]
#[error("No subscribers for {event_type}")]
pub struct PublishError {
    pub event_type: &'static str,
}

/// In-process fan-out event bus.
///
/// ```rust
/// use curator_events::bus::EventBus;
///
/// let bus = EventBus::default();
/// let _rx = bus.subscribe();
/// assert_eq!(bus.subscriber_count(), 1);
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ReviewEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest messages are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers, returning how many received it.
    pub fn publish(&self, event: ReviewEvent) -> Result<usize, PublishError> {
        let event_type = event.event_type();
        self.sender
            .send(event)
            .map_err(|_| PublishError { event_type })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReviewEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
