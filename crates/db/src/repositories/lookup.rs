//! Generic store for the lookup tables.
//!
//! Every lookup kind shares the same five operations. A kind plugs in by
//! implementing [`Lookup`], which ties its entity, record, draft and change
//! set together.

use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;
use workcast_core::catalog::{ChangeSet, Draft};
use workcast_core::reconcile::{Reconcile, ReconcileTarget};
use workcast_shared::types::PageRequest;

use super::error::{StoreError, delete_error, within, write_error};

/// A lookup table served by [`LookupRepository`].
pub trait Lookup: Send + Sync + 'static {
    /// `SeaORM` entity.
    type Entity: EntityTrait<Model = Self::Model>;
    /// Stored row.
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::Active>
        + Send
        + Sync;
    /// Row under construction.
    type Active: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + 'static;

    /// Typed primary key.
    type Id: Copy + Into<i32> + fmt::Display + fmt::Debug + Send + Sync + 'static;
    /// Domain record returned to callers.
    type Record: Reconcile<Id = Self::Id, Changes = Self::Changes>
        + Serialize
        + DeserializeOwned
        + Clone
        + Send
        + Sync
        + 'static;
    /// Creation input.
    type Draft: Draft + DeserializeOwned + Send + 'static;
    /// Sparse update input.
    type Changes: ChangeSet<Self::Record> + From<Self::Draft> + DeserializeOwned + Send + 'static;

    /// Human-readable kind, e.g. "business unit".
    const LABEL: &'static str;
    /// Tables this kind references, for error messages. Kinds without
    /// foreign keys never raise `InvalidReference` and use "parent".
    const PARENTS: &'static str;
    /// Tables that reference this kind, for error messages.
    const CHILDREN: &'static str;

    /// Primary key column.
    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    /// Builds an insertable row from a validated draft.
    fn new_active(draft: Self::Draft) -> Self::Active;

    /// Sets every field present in `changes`.
    fn apply_changes(active: &mut Self::Active, changes: Self::Changes);

    /// Converts a stored row into its record.
    fn to_record(model: Self::Model) -> Self::Record;
}

/// CRUD over one lookup table.
pub struct LookupRepository<L> {
    db: DatabaseConnection,
    deadline: Duration,
    kind: PhantomData<fn() -> L>,
}

impl<L> Clone for LookupRepository<L> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            deadline: self.deadline,
            kind: PhantomData,
        }
    }
}

impl<L: Lookup> fmt::Debug for LookupRepository<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupRepository")
            .field("kind", &L::LABEL)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

impl<L: Lookup> LookupRepository<L> {
    /// Creates a new repository. Every call is bounded by `deadline`.
    #[must_use]
    pub const fn new(db: DatabaseConnection, deadline: Duration) -> Self {
        Self {
            db,
            deadline,
            kind: PhantomData,
        }
    }

    /// Inserts a new row.
    ///
    /// # Errors
    ///
    /// `Validation` for bad input, `DuplicateName` when the name is taken,
    /// `InvalidReference` when a parent id does not exist.
    pub async fn create(&self, draft: L::Draft) -> Result<L::Record, StoreError> {
        let active = L::new_active(draft.validated()?);

        let model = within(self.deadline, async {
            active
                .insert(&self.db)
                .await
                .map_err(|err| write_error(err, duplicate_name::<L>, invalid_reference::<L>))
        })
        .await?;

        let record = L::to_record(model);
        info!(kind = L::LABEL, id = %record.id(), "created");
        Ok(record)
    }

    /// Fetches a row by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get(&self, id: L::Id) -> Result<Option<L::Record>, StoreError> {
        Ok(self.find_model(id).await?.map(L::to_record))
    }

    /// Lists rows in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, page: PageRequest) -> Result<Vec<L::Record>, StoreError> {
        let models = within(self.deadline, async {
            Ok(L::Entity::find()
                .order_by_asc(L::id_column())
                .offset(page.offset())
                .limit(page.limit())
                .all(&self.db)
                .await?)
        })
        .await?;

        Ok(models.into_iter().map(L::to_record).collect())
    }

    /// Applies the fields present in `changes` and returns the updated row.
    ///
    /// # Errors
    ///
    /// `NotFound` when the row does not exist, plus the errors of
    /// [`LookupRepository::create`].
    pub async fn update(&self, id: L::Id, changes: L::Changes) -> Result<L::Record, StoreError> {
        let current = self
            .find_model(id)
            .await?
            .ok_or_else(|| not_found::<L>(id))?;

        let changes = changes.validated_against(&L::to_record(current.clone()))?;
        if changes.is_empty() {
            return Ok(L::to_record(current));
        }

        let mut active = current.into_active_model();
        L::apply_changes(&mut active, changes);

        let model = within(self.deadline, async {
            active.update(&self.db).await.map_err(|err| match err {
                DbErr::RecordNotUpdated => not_found::<L>(id),
                err => write_error(err, duplicate_name::<L>, invalid_reference::<L>),
            })
        })
        .await?;

        info!(kind = L::LABEL, %id, "updated");
        Ok(L::to_record(model))
    }

    /// Deletes a row and returns its last value.
    ///
    /// # Errors
    ///
    /// `NotFound` when the row does not exist, `ReferencedByChild` when other
    /// rows still point at it.
    pub async fn delete(&self, id: L::Id) -> Result<L::Record, StoreError> {
        let current = self
            .find_model(id)
            .await?
            .ok_or_else(|| not_found::<L>(id))?;

        let raw: i32 = id.into();
        let result = within(self.deadline, async {
            L::Entity::delete_many()
                .filter(L::id_column().eq(raw))
                .exec(&self.db)
                .await
                .map_err(|err| delete_error(err, || referenced_by_child::<L>(id)))
        })
        .await?;

        if result.rows_affected == 0 {
            return Err(not_found::<L>(id));
        }

        info!(kind = L::LABEL, %id, "deleted");
        Ok(L::to_record(current))
    }

    async fn find_model(&self, id: L::Id) -> Result<Option<L::Model>, StoreError> {
        let raw: i32 = id.into();
        within(self.deadline, async {
            Ok(L::Entity::find()
                .filter(L::id_column().eq(raw))
                .one(&self.db)
                .await?)
        })
        .await
    }
}

#[async_trait]
impl<L: Lookup> ReconcileTarget for LookupRepository<L> {
    type Row = L::Record;
    type Error = StoreError;

    async fn apply_update(&self, id: L::Id, changes: L::Changes) -> Result<(), StoreError> {
        self.update(id, changes).await.map(drop)
    }

    async fn apply_delete(&self, id: L::Id) -> Result<(), StoreError> {
        self.delete(id).await.map(drop)
    }
}

fn duplicate_name<L: Lookup>() -> StoreError {
    StoreError::DuplicateName(format!("a {} with this name already exists", L::LABEL))
}

fn invalid_reference<L: Lookup>() -> StoreError {
    StoreError::InvalidReference(format!(
        "{} references a missing {}",
        L::LABEL,
        L::PARENTS
    ))
}

fn referenced_by_child<L: Lookup>(id: L::Id) -> StoreError {
    StoreError::ReferencedByChild(format!(
        "{} {id} is still referenced by {}",
        L::LABEL,
        L::CHILDREN
    ))
}

fn not_found<L: Lookup>(id: L::Id) -> StoreError {
    StoreError::NotFound {
        entity: L::LABEL,
        id: id.into(),
    }
}
