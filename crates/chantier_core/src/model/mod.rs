//! Entity model for the construction dashboard.
//!
//! # Responsibility
//! - Define the canonical records held by the session stores.
//! - Provide draft (create) and patch (update) shapes for every entity.
//! - Validate single-entity invariants before anything reaches a store.
//!
//! # Invariants
//! - Every entity is identified by a string ID unique within its collection.
//! - Cross-entity references (`project_id`, `member_id`, ...) are plain IDs;
//!   they may dangle and readers must tolerate that.
//! - Model types carry no cross-entity behavior; see `crate::rules`.

pub mod clocking;
pub mod finance;
pub mod inventory;
pub mod project;
pub mod team;
pub mod time;
pub mod validation;

use std::fmt::{Display, Formatter};

pub use validation::ValidationError;

/// Entity collections known to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    Task,
    DailyLog,
    Document,
    Team,
    TeamMember,
    ClockingEntry,
    Material,
    Supplier,
    FinancialRecord,
    Invoice,
    InvoiceItem,
}

impl EntityKind {
    /// Stable lowercase label used in error messages and log events.
    pub fn label(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Task => "task",
            Self::DailyLog => "daily_log",
            Self::Document => "document",
            Self::Team => "team",
            Self::TeamMember => "team_member",
            Self::ClockingEntry => "clocking_entry",
            Self::Material => "material",
            Self::Supplier => "supplier",
            Self::FinancialRecord => "financial_record",
            Self::Invoice => "invoice",
            Self::InvoiceItem => "invoice_item",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Record that can live in an `EntityStore`.
pub trait Entity: Clone {
    /// Collection this record belongs to.
    const KIND: EntityKind;

    /// Stable identifier, unique within the collection.
    fn id(&self) -> &str;

    /// Checks single-entity invariants.
    fn validate(&self) -> Result<(), ValidationError>;
}
