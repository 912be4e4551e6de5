//! Response envelopes for the moderation endpoints.

use serde::Serialize;

/// `201` body for a submit.
#[derive(Debug, Serialize)]
pub struct SubmitResponse<T: Serialize> {
    pub record: T,
    pub auto_approved: bool,
}

/// `{ "records": [...] }` list envelope.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub records: Vec<T>,
}

/// Body returned by approve and reject.
#[derive(Debug, Serialize)]
pub struct ReviewResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub record: T,
}

/// `{ "notifications": [...] }` envelope.
#[derive(Debug, Serialize)]
pub struct NotificationList<T: Serialize> {
    pub notifications: Vec<T>,
    pub unread_count: i64,
}
