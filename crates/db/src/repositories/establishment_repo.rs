//! Repository for the `establishments` table.

use async_trait::async_trait;
use curator_core::types::{BoxError, DbId, FieldMap};
use curator_core::workflow::{EntityMutator, EntitySummary, ItemType};
use sqlx::PgPool;

use crate::error::EntityWriteError;
use crate::models::decode_validated;
use crate::models::establishment::{
    CreateEstablishment, Establishment, UpdateEstablishment, ESTABLISHMENT_REQUIRED_FIELDS,
    ESTABLISHMENT_WRITABLE_FIELDS,
};
use crate::models::status::{ENTITY_STATUS_APPROVED, ENTITY_STATUS_PENDING};

const COLUMNS: &str = "id, name, address, city, description, website, phone, status, \
    created_by, created_at, updated_at";

/// Provides CRUD operations for establishments.
pub struct EstablishmentRepo;

impl EstablishmentRepo {
    pub async fn create_pending(
        pool: &PgPool,
        author_id: DbId,
        input: &CreateEstablishment,
    ) -> Result<Establishment, sqlx::Error> {
        let query = format!(
            "INSERT INTO establishments
                (name, address, city, description, website, phone, status, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Establishment>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.description)
            .bind(&input.website)
            .bind(&input.phone)
            .bind(ENTITY_STATUS_PENDING)
            .bind(author_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Establishment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM establishments WHERE id = $1");
        sqlx::query_as::<_, Establishment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lifecycle status of one row, `None` when it does not exist.
    pub async fn find_status(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT status FROM establishments WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partial update; `None` fields keep their stored value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEstablishment,
    ) -> Result<Option<Establishment>, sqlx::Error> {
        let query = format!(
            "UPDATE establishments SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                city = COALESCE($4, city),
                description = COALESCE($5, description),
                website = COALESCE($6, website),
                phone = COALESCE($7, phone)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Establishment>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.description)
            .bind(&input.website)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Establishment>, sqlx::Error> {
        let query =
            format!("UPDATE establishments SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Establishment>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}

/// [`EntityMutator`] for establishments.
#[derive(Debug, Clone)]
pub struct EstablishmentMutator {
    pool: PgPool,
}

impl EstablishmentMutator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn summary(row: Establishment) -> EntitySummary {
    EntitySummary {
        item_type: ItemType::Establishment,
        id: row.id,
        status: row.status,
    }
}

const ENTITY: &str = "Establishment";

#[async_trait]
impl EntityMutator for EstablishmentMutator {
    fn item_type(&self) -> ItemType {
        ItemType::Establishment
    }

    fn writable_fields(&self) -> &'static [&'static str] {
        ESTABLISHMENT_WRITABLE_FIELDS
    }

    fn required_fields(&self) -> &'static [&'static str] {
        ESTABLISHMENT_REQUIRED_FIELDS
    }

    fn validate_fields(&self, fields: &FieldMap) -> Result<(), BoxError> {
        decode_validated::<UpdateEstablishment>(ENTITY, fields)?;
        Ok(())
    }

    async fn status_of(&self, item_id: DbId) -> Result<Option<String>, BoxError> {
        Ok(EstablishmentRepo::find_status(&self.pool, item_id).await?)
    }

    async fn apply(&self, item_id: DbId, changes: &FieldMap) -> Result<EntitySummary, BoxError> {
        let input: UpdateEstablishment = decode_validated(ENTITY, changes)?;
        match EstablishmentRepo::update(&self.pool, item_id, &input).await? {
            Some(row) => Ok(summary(row)),
            None => Err(EntityWriteError::Missing {
                entity: ENTITY,
                id: item_id,
            }
            .into()),
        }
    }

    async fn activate(&self, item_id: DbId) -> Result<EntitySummary, BoxError> {
        match EstablishmentRepo::set_status(&self.pool, item_id, ENTITY_STATUS_APPROVED).await? {
            Some(row) => Ok(summary(row)),
            None => Err(EntityWriteError::Missing {
                entity: ENTITY,
                id: item_id,
            }
            .into()),
        }
    }

    async fn create_pending(
        &self,
        author_id: DbId,
        fields: &FieldMap,
    ) -> Result<EntitySummary, BoxError> {
        let input: CreateEstablishment = decode_validated(ENTITY, fields)?;
        let row = EstablishmentRepo::create_pending(&self.pool, author_id, &input).await?;
        Ok(summary(row))
    }
}
