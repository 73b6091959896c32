//! Generic typed repository over one stored collection.
//!
//! # Responsibility
//! - Provide uniform CRUD over any `Record` collection.
//! - Keep the read-modify-write cycle in one place.
//!
//! # Invariants
//! - Write paths call `Record::validate()` before saving.
//! - `add` refuses an id that already exists, so ids stay unique.
//! - `update`/`delete` of a missing id are silent no-ops and write nothing.

use crate::model::validation::ValidationError;
use crate::model::RecordId;
use crate::store::{CollectionStore, Slot, StoreError};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    Validation(ValidationError),
    DuplicateId(RecordId),
    NotFound(RecordId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "record id already exists: {id}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// A value record stored in its own collection slot.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Where the collection lives.
    const SLOT: Slot;

    fn id(&self) -> &str;

    fn validate(&self) -> Result<(), ValidationError>;
}

/// CRUD access to the collection of `T`.
pub struct CollectionRepository<'store, T: Record> {
    store: &'store CollectionStore,
    _record: PhantomData<fn() -> T>,
}

impl<'store, T: Record> CollectionRepository<'store, T> {
    pub fn new(store: &'store CollectionStore) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Validates and appends `record`.
    ///
    /// # Errors
    /// - `Validation` when the record is invalid.
    /// - `DuplicateId` when a record with the same id exists.
    pub fn add(&self, record: &T) -> RepoResult<()> {
        record.validate()?;
        let mut records = self.all()?;
        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(RepoError::DuplicateId(record.id().to_string()));
        }
        records.push(record.clone());
        self.store.save(T::SLOT, &records)?;
        Ok(())
    }

    pub fn all(&self) -> RepoResult<Vec<T>> {
        Ok(self.store.load(T::SLOT)?)
    }

    pub fn get(&self, id: &str) -> RepoResult<Option<T>> {
        Ok(self.all()?.into_iter().find(|record| record.id() == id))
    }

    /// Replaces the first record with the same id.
    ///
    /// Returns `false` without writing when no record matches.
    pub fn update(&self, record: &T) -> RepoResult<bool> {
        record.validate()?;
        let mut records = self.all()?;
        let Some(target) = records
            .iter_mut()
            .find(|existing| existing.id() == record.id())
        else {
            debug!(
                "event=repo_update module=repo status=skipped collection={} reason=not_found",
                T::SLOT
            );
            return Ok(false);
        };
        *target = record.clone();
        self.store.save(T::SLOT, &records)?;
        Ok(true)
    }

    /// Removes every record with `id`, returning how many were removed.
    pub fn delete(&self, id: &str) -> RepoResult<usize> {
        self.retain(|record| record.id() != id)
    }

    pub fn find_by(&self, predicate: impl Fn(&T) -> bool) -> RepoResult<Vec<T>> {
        let mut records = self.all()?;
        records.retain(|record| predicate(record));
        Ok(records)
    }

    /// Mutates the first record with `id` in place and saves it.
    ///
    /// The id cannot be changed through `apply`. Returns `false` without
    /// writing when no record matches.
    pub fn modify(&self, id: &str, apply: impl FnOnce(&mut T)) -> RepoResult<bool> {
        let mut records = self.all()?;
        let Some(record) = records.iter_mut().find(|record| record.id() == id) else {
            return Ok(false);
        };
        let mut changed = record.clone();
        apply(&mut changed);
        if changed.id() != id {
            return Err(ValidationError::IdChanged(id.to_string()).into());
        }
        changed.validate()?;
        *record = changed;
        self.store.save(T::SLOT, &records)?;
        Ok(true)
    }

    /// Keeps records matching `keep` and saves if anything was removed.
    pub fn retain(&self, keep: impl Fn(&T) -> bool) -> RepoResult<usize> {
        let mut records = self.all()?;
        let before = records.len();
        records.retain(|record| keep(record));
        let removed = before - records.len();
        if removed > 0 {
            self.store.save(T::SLOT, &records)?;
        }
        debug!(
            "event=repo_retain module=repo status=ok collection={} removed={}",
            T::SLOT,
            removed
        );
        Ok(removed)
    }

    /// Rewrites every record through `apply`, saving once.
    ///
    /// Returns how many records `apply` reported as changed.
    pub fn rewrite(&self, mut apply: impl FnMut(&mut T) -> bool) -> RepoResult<usize> {
        let mut records = self.all()?;
        let mut changed = 0;
        for record in &mut records {
            if apply(record) {
                record.validate()?;
                changed += 1;
            }
        }
        if changed > 0 {
            self.store.save(T::SLOT, &records)?;
        }
        Ok(changed)
    }

    /// Empties the collection.
    pub fn clear(&self) -> RepoResult<()> {
        self.store.remove(T::SLOT)?;
        Ok(())
    }
}
