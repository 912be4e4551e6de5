//! Repository for the `employees` table.

use async_trait::async_trait;
use curator_core::types::{BoxError, DbId, FieldMap};
use curator_core::workflow::{EntityMutator, EntitySummary, ItemType};
use sqlx::PgPool;

use crate::error::EntityWriteError;
use crate::models::decode_validated;
use crate::models::employee::{
    CreateEmployee, Employee, UpdateEmployee, EMPLOYEE_REQUIRED_FIELDS, EMPLOYEE_WRITABLE_FIELDS,
};
use crate::models::status::{ENTITY_STATUS_APPROVED, ENTITY_STATUS_PENDING};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, establishment_id, name, position, bio, status, created_by, \
    created_at, updated_at";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert a new employee in pending state.
    pub async fn create_pending(
        pool: &PgPool,
        author_id: DbId,
        input: &CreateEmployee,
    ) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees (establishment_id, name, position, bio, status, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(input.establishment_id)
            .bind(&input.name)
            .bind(&input.position)
            .bind(&input.bio)
            .bind(ENTITY_STATUS_PENDING)
            .bind(author_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lifecycle status of one row, `None` when it does not exist.
    pub async fn find_status(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT status FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update an employee. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmployee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET
                establishment_id = COALESCE($2, establishment_id),
                name = COALESCE($3, name),
                position = COALESCE($4, position),
                bio = COALESCE($5, bio)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(input.establishment_id)
            .bind(&input.name)
            .bind(&input.position)
            .bind(&input.bio)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("UPDATE employees SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}

/// [`EntityMutator`] for employees.
#[derive(Debug, Clone)]
pub struct EmployeeMutator {
    pool: PgPool,
}

impl EmployeeMutator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn summary(row: Employee) -> EntitySummary {
    EntitySummary {
        item_type: ItemType::Employee,
        id: row.id,
        status: row.status,
    }
}

fn missing(id: DbId) -> EntityWriteError {
    EntityWriteError::Missing {
        entity: "Employee",
        id,
    }
}

#[async_trait]
impl EntityMutator for EmployeeMutator {
    fn item_type(&self) -> ItemType {
        ItemType::Employee
    }

    fn writable_fields(&self) -> &'static [&'static str] {
        EMPLOYEE_WRITABLE_FIELDS
    }

    fn required_fields(&self) -> &'static [&'static str] {
        EMPLOYEE_REQUIRED_FIELDS
    }

    fn validate_fields(&self, fields: &FieldMap) -> Result<(), BoxError> {
        decode_validated::<UpdateEmployee>("Employee", fields)?;
        Ok(())
    }

    async fn status_of(&self, item_id: DbId) -> Result<Option<String>, BoxError> {
        Ok(EmployeeRepo::find_status(&self.pool, item_id).await?)
    }

    async fn apply(&self, item_id: DbId, changes: &FieldMap) -> Result<EntitySummary, BoxError> {
        let input: UpdateEmployee = decode_validated("Employee", changes)?;
        let row = EmployeeRepo::update(&self.pool, item_id, &input)
            .await?
            .ok_or_else(|| missing(item_id))?;
        Ok(summary(row))
    }

    async fn activate(&self, item_id: DbId) -> Result<EntitySummary, BoxError> {
        let row = EmployeeRepo::set_status(&self.pool, item_id, ENTITY_STATUS_APPROVED)
            .await?
            .ok_or_else(|| missing(item_id))?;
        Ok(summary(row))
    }

    async fn create_pending(
        &self,
        author_id: DbId,
        fields: &FieldMap,
    ) -> Result<EntitySummary, BoxError> {
        let input: CreateEmployee = decode_validated("Employee", fields)?;
        let row = EmployeeRepo::create_pending(&self.pool, author_id, &input).await?;
        Ok(summary(row))
    }
}
