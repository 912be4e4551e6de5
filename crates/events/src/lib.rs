//! Curator workflow event bus.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ReviewEvent`] -- envelope for moderation transitions.
//! - [`EventBusNotifier`] -- the workflow [`Notifier`](curator_core::workflow::Notifier)
//!   that turns transitions into bus events.

pub mod bus;
pub mod notifier;

pub use bus::{EventBus, PublishError, ReviewEvent, ReviewEventKind};
pub use notifier::EventBusNotifier;
