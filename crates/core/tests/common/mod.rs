//! In-memory collaborators for exercising the workflow engine without a
//! database. Each fake records every call so tests can assert on exact
//! side-effect counts.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use curator_core::roles::{Role, RoleResolver};
use curator_core::types::{BoxError, DbId, FieldMap};
use curator_core::workflow::{
    EntityMutator, EntitySummary, ItemType, Mutation, MutatorRegistry, NewRecord, Notifier,
    RecordFilter, RecordKind, ReviewNotice, ReviewRecord, ReviewStatus, ReviewStore, StatusChange,
    WorkflowEngine,
};

pub const ADMIN: DbId = 1;
pub const MODERATOR: DbId = 2;
pub const USER: DbId = 3;
pub const OTHER_USER: DbId = 4;
/// A user id the role resolver knows nothing about.
pub const GHOST: DbId = 99;

pub const EMPLOYEE_FIELDS: &[&str] = &["name", "position", "bio", "establishment_id"];
pub const ESTABLISHMENT_FIELDS: &[&str] = &["name", "address", "city", "description"];
pub const COMMENT_FIELDS: &[&str] = &["content", "rating", "employee_id", "establishment_id"];

pub fn fields(pairs: &[(&str, serde_json::Value)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TestRecord {
    pub id: DbId,
    pub kind: RecordKind,
    pub item_type: ItemType,
    pub item_id: DbId,
    pub status: ReviewStatus,
    pub author_id: DbId,
    pub fields: FieldMap,
    pub current_values: Option<FieldMap>,
    pub moderator_notes: Option<String>,
    pub reviewed_by: Option<DbId>,
}

impl ReviewRecord for TestRecord {
    fn id(&self) -> DbId {
        self.id
    }
    fn item_type(&self) -> ItemType {
        self.item_type
    }
    fn item_id(&self) -> DbId {
        self.item_id
    }
    fn status(&self) -> ReviewStatus {
        self.status
    }
    fn author_id(&self) -> DbId {
        self.author_id
    }
    fn moderator_notes(&self) -> Option<&str> {
        self.moderator_notes.as_deref()
    }
    fn approval_mutation(&self) -> Mutation<'_> {
        match self.kind {
            RecordKind::Submission => Mutation::Activate,
            RecordKind::EditProposal => Mutation::Apply(&self.fields),
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct StoreCounters {
    pub reads: AtomicUsize,
    pub creates: AtomicUsize,
    pub status_updates: AtomicUsize,
}

pub struct MemoryStore {
    kind: RecordKind,
    records: Mutex<Vec<TestRecord>>,
    pub counters: StoreCounters,
    pub fail_reads: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_status_update: AtomicBool,
    /// Simulate a concurrent reviewer winning the conditional update.
    pub lose_race: AtomicBool,
}

impl MemoryStore {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            records: Mutex::new(Vec::new()),
            counters: StoreCounters::default(),
            fail_reads: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
            fail_status_update: AtomicBool::new(false),
            lose_race: AtomicBool::new(false),
        }
    }

    /// Insert a record directly, bypassing counters.
    pub fn seed(
        &self,
        item_type: ItemType,
        item_id: DbId,
        author_id: DbId,
        status: ReviewStatus,
    ) -> TestRecord {
        let mut records = self.records.lock().unwrap();
        let record = TestRecord {
            id: records.len() as DbId + 1,
            kind: self.kind,
            item_type,
            item_id,
            status,
            author_id,
            fields: fields(&[("name", serde_json::json!("Seeded"))]),
            current_values: None,
            moderator_notes: None,
            reviewed_by: None,
        };
        records.push(record.clone());
        record
    }

    pub fn snapshot(&self, id: DbId) -> Option<TestRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn newest_first(mut records: Vec<TestRecord>) -> Vec<TestRecord> {
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    type Record = TestRecord;

    async fn create(&self, input: &NewRecord) -> Result<TestRecord, BoxError> {
        self.counters.creates.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err("insert failed".into());
        }
        let mut records = self.records.lock().unwrap();
        let record = TestRecord {
            id: records.len() as DbId + 1,
            kind: self.kind,
            item_type: input.item_type,
            item_id: input.item_id,
            status: input.status,
            author_id: input.author_id,
            fields: input.fields.clone(),
            current_values: input.current_values.clone(),
            moderator_notes: None,
            reviewed_by: input.reviewed_by,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<TestRecord>, BoxError> {
        self.counters.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err("connection reset".into());
        }
        Ok(self.snapshot(id))
    }

    async fn update_status(&self, change: &StatusChange) -> Result<Option<TestRecord>, BoxError> {
        self.counters.status_updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_status_update.load(Ordering::SeqCst) {
            return Err("update failed".into());
        }
        if self.lose_race.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let mut records = self.records.lock().unwrap();
        let Some(record) = records
            .iter_mut()
            .find(|r| r.id == change.id && r.status == ReviewStatus::Pending)
        else {
            return Ok(None);
        };
        record.status = change.status;
        record.reviewed_by = Some(change.reviewer_id);
        record.moderator_notes = change.notes.clone();
        Ok(Some(record.clone()))
    }

    async fn list(&self, filter: &RecordFilter) -> Result<Vec<TestRecord>, BoxError> {
        self.counters.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err("connection reset".into());
        }
        let records = self.records.lock().unwrap();
        Ok(Self::newest_first(
            records.iter().filter(|r| filter.matches(*r)).cloned().collect(),
        ))
    }

    async fn list_by_actor(&self, actor_id: DbId) -> Result<Vec<TestRecord>, BoxError> {
        self.counters.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err("connection reset".into());
        }
        let records = self.records.lock().unwrap();
        Ok(Self::newest_first(
            records
                .iter()
                .filter(|r| r.author_id == actor_id)
                .cloned()
                .collect(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Mutator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum MutatorCall {
    Apply(ItemType, DbId, FieldMap),
    Activate(ItemType, DbId),
}

pub struct RecordingMutator {
    item_type: ItemType,
    writable: &'static [&'static str],
    /// Entity id to lifecycle status.
    existing: Mutex<HashMap<DbId, String>>,
    calls: Arc<Mutex<Vec<MutatorCall>>>,
    pub fail: AtomicBool,
}

impl RecordingMutator {
    pub fn new(
        item_type: ItemType,
        writable: &'static [&'static str],
        calls: Arc<Mutex<Vec<MutatorCall>>>,
    ) -> Self {
        Self {
            item_type,
            writable,
            existing: Mutex::new((1..=10).map(|id| (id, "approved".to_string())).collect()),
            calls,
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_entity_status(&self, id: DbId, status: &str) {
        self.existing.lock().unwrap().insert(id, status.to_string());
    }

    fn summary(&self, id: DbId, status: &str) -> EntitySummary {
        EntitySummary {
            item_type: self.item_type,
            id,
            status: status.to_string(),
        }
    }
}

#[async_trait]
impl EntityMutator for RecordingMutator {
    fn item_type(&self) -> ItemType {
        self.item_type
    }

    fn writable_fields(&self) -> &'static [&'static str] {
        self.writable
    }

    fn validate_fields(&self, fields: &FieldMap) -> Result<(), BoxError> {
        for (key, value) in fields {
            if !value.is_string() && !value.is_null() {
                return Err(format!("{key} must be a string").into());
            }
        }
        Ok(())
    }

    async fn status_of(&self, item_id: DbId) -> Result<Option<String>, BoxError> {
        Ok(self.existing.lock().unwrap().get(&item_id).cloned())
    }

    async fn apply(&self, item_id: DbId, changes: &FieldMap) -> Result<EntitySummary, BoxError> {
        self.calls
            .lock()
            .unwrap()
            .push(MutatorCall::Apply(self.item_type, item_id, changes.clone()));
        if self.fail.load(Ordering::SeqCst) {
            return Err("row locked".into());
        }
        Ok(self.summary(item_id, "approved"))
    }

    async fn activate(&self, item_id: DbId) -> Result<EntitySummary, BoxError> {
        self.calls
            .lock()
            .unwrap()
            .push(MutatorCall::Activate(self.item_type, item_id));
        if self.fail.load(Ordering::SeqCst) {
            return Err("row locked".into());
        }
        Ok(self.summary(item_id, "approved"))
    }

    async fn create_pending(
        &self,
        _author_id: DbId,
        _fields: &FieldMap,
    ) -> Result<EntitySummary, BoxError> {
        let mut existing = self.existing.lock().unwrap();
        let id = existing.keys().max().copied().unwrap_or(0) + 1;
        existing.insert(id, "pending".to_string());
        Ok(self.summary(id, "pending"))
    }
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

pub struct StaticRoles {
    roles: HashMap<DbId, Role>,
    pub lookups: AtomicUsize,
    pub fail: AtomicBool,
}

impl Default for StaticRoles {
    fn default() -> Self {
        Self {
            roles: HashMap::from([
                (ADMIN, Role::Admin),
                (MODERATOR, Role::Moderator),
                (USER, Role::User),
                (OTHER_USER, Role::User),
            ]),
            lookups: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl RoleResolver for StaticRoles {
    async fn get_role(&self, user_id: DbId) -> Result<Option<Role>, BoxError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err("users table unavailable".into());
        }
        Ok(self.roles.get(&user_id).copied())
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    NewSubmission(ReviewNotice),
    Approved(ReviewNotice),
    Rejected(ReviewNotice, String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Sent>>,
    pub fail: AtomicBool,
}

impl RecordingNotifier {
    fn record(&self, sent: Sent) -> Result<(), BoxError> {
        self.sent.lock().unwrap().push(sent);
        if self.fail.load(Ordering::SeqCst) {
            return Err("bus closed".into());
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_new_submission(&self, notice: &ReviewNotice) -> Result<(), BoxError> {
        self.record(Sent::NewSubmission(notice.clone()))
    }

    async fn notify_approved(&self, notice: &ReviewNotice) -> Result<(), BoxError> {
        self.record(Sent::Approved(notice.clone()))
    }

    async fn notify_rejected(&self, notice: &ReviewNotice, notes: &str) -> Result<(), BoxError> {
        self.record(Sent::Rejected(notice.clone(), notes.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Harness {
    pub engine: WorkflowEngine<TestRecord>,
    pub store: Arc<MemoryStore>,
    pub roles: Arc<StaticRoles>,
    pub notifier: Arc<RecordingNotifier>,
    pub employees: Arc<RecordingMutator>,
    pub calls: Arc<Mutex<Vec<MutatorCall>>>,
}

impl Harness {
    pub fn new(kind: RecordKind) -> Self {
        let store = Arc::new(MemoryStore::new(kind));
        let roles = Arc::new(StaticRoles::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let calls = Arc::new(Mutex::new(Vec::new()));
        let employees = Arc::new(RecordingMutator::new(
            ItemType::Employee,
            EMPLOYEE_FIELDS,
            Arc::clone(&calls),
        ));
        let registry = MutatorRegistry::new()
            .with(employees.clone())
            .with(Arc::new(RecordingMutator::new(
                ItemType::Establishment,
                ESTABLISHMENT_FIELDS,
                Arc::clone(&calls),
            )))
            .with(Arc::new(RecordingMutator::new(
                ItemType::Comment,
                COMMENT_FIELDS,
                Arc::clone(&calls),
            )));

        let engine = WorkflowEngine::new(
            kind,
            store.clone(),
            roles.clone(),
            Arc::new(registry),
            notifier.clone(),
        );

        Self {
            engine,
            store,
            roles,
            notifier,
            employees,
            calls,
        }
    }

    pub fn mutator_calls(&self) -> Vec<MutatorCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.notifier.sent.lock().unwrap().clone()
    }

    pub fn store_reads(&self) -> usize {
        self.store.counters.reads.load(Ordering::SeqCst)
    }

    pub fn store_writes(&self) -> usize {
        self.store.counters.creates.load(Ordering::SeqCst)
            + self.store.counters.status_updates.load(Ordering::SeqCst)
    }
}
