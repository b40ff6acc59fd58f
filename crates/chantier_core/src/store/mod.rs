//! In-memory entity collections.
//!
//! # Responsibility
//! - Hold one ordered collection per entity type.
//! - Provide CRUD primitives with validation on every write path.
//!
//! # Invariants
//! - IDs are unique within a store; inserting a duplicate is rejected.
//! - A write either commits fully or leaves the store untouched.
//! - Stores know nothing about other stores; cross-entity rules live in
//!   `crate::rules`.

pub mod entity_store;

use crate::model::{EntityKind, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use entity_store::{EntityStore, InsertAt};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for CRUD operations.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    NotFound { kind: EntityKind, id: String },
    DuplicateId { kind: EntityKind, id: String },
    Validation(ValidationError),
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::DuplicateId { kind, id } => write!(f, "{kind} id already exists: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } | Self::DuplicateId { .. } => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
