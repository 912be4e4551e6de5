/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A partial field map: field name to JSON value.
///
/// Used for proposed changes, current-value snapshots, and submission
/// payloads.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

/// Boxed error returned by collaborator implementations.
///
/// The workflow engine never inspects these beyond logging; it maps each
/// failure to a specific [`WorkflowError`](crate::workflow::WorkflowError)
/// kind depending on which step failed.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
