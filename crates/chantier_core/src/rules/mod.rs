//! Cross-entity invariants.
//!
//! # Responsibility
//! - Keep multi-store invariants true after every mutation: team/project
//!   exclusivity, deletion cascades, clocking transitions and invoice totals.
//!
//! # Invariants
//! - Rule functions check every precondition before touching any store, so a
//!   rejected call leaves all stores unchanged.
//! - Only `crate::session` calls these functions.

pub mod cascade;
pub mod clocking;
pub mod invoice_totals;
pub mod team_assignment;

use crate::model::ValidationError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RuleResult<T> = Result<T, RuleError>;

/// Operation rejected because of the current state, not its input shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidState {
    /// Clock-out without a `present` entry for the member and date.
    NoOpenEntry,
    /// Clock-in when the member already has an entry for the date.
    AlreadyClockedIn,
    /// Manual entry colliding with an existing entry for member and date.
    DuplicateClockingEntry,
    /// Removing the only remaining invoice line.
    LastInvoiceItem,
}

impl Display for InvalidState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoOpenEntry => write!(f, "no open clocking entry for this member and date"),
            Self::AlreadyClockedIn => write!(f, "member already has a clocking entry for this date"),
            Self::DuplicateClockingEntry => {
                write!(f, "a clocking entry already exists for this member and date")
            }
            Self::LastInvoiceItem => write!(f, "an invoice must keep at least one item"),
        }
    }
}

impl Error for InvalidState {}

/// Error returned by rule functions.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleError {
    Store(StoreError),
    InvalidState(InvalidState),
}

impl Display for RuleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidState(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RuleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidState(err) => Some(err),
        }
    }
}

impl From<StoreError> for RuleError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ValidationError> for RuleError {
    fn from(value: ValidationError) -> Self {
        Self::Store(StoreError::Validation(value))
    }
}

impl From<InvalidState> for RuleError {
    fn from(value: InvalidState) -> Self {
        Self::InvalidState(value)
    }
}
