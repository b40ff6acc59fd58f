//! Session state owner.
//!
//! # Responsibility
//! - Own the eight entity stores for the lifetime of a session.
//! - Expose every create/update/delete/assign use case as a `&mut self`
//!   method and every view as a `&self` method.
//!
//! # Invariants
//! - No other type mutates the stores; cross-entity rules run here.
//! - A failed call leaves every store unchanged.
//! - Mutations log metadata-only events (`event=... module=session ...`).

mod clocking;
mod finance;
mod inventory;
mod projects;
mod teams;

use crate::config::CoreConfig;
use crate::model::clocking::ClockingEntry;
use crate::model::finance::{FinancialRecord, Invoice};
use crate::model::inventory::{Material, Supplier};
use crate::model::project::Project;
use crate::model::team::{Team, TeamMember};
use crate::model::{EntityKind, ValidationError};
use crate::rules::team_assignment::enforce_exclusive_claim;
use crate::rules::{clocking as clocking_rules, invoice_totals, InvalidState, RuleError};
use crate::seed::{SeedData, SeedSource};
use crate::store::{EntityStore, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use projects::SavedReport;

pub type SessionResult<T> = Result<T, SessionError>;

/// Typed failure reason for a session use case.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    NotFound { kind: EntityKind, id: String },
    Validation(ValidationError),
    InvalidState(InvalidState),
    Store(StoreError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidState(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Validation(err) => Some(err),
            Self::InvalidState(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl SessionError {
    /// Short category used in log events.
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation",
            Self::InvalidState(_) => "invalid_state",
            Self::Store(_) => "store",
        }
    }

    pub(crate) fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound { kind, id } => Self::NotFound { kind, id },
            StoreError::Validation(err) => Self::Validation(err),
            other @ StoreError::DuplicateId { .. } => Self::Store(other),
        }
    }
}

impl From<ValidationError> for SessionError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<InvalidState> for SessionError {
    fn from(value: InvalidState) -> Self {
        Self::InvalidState(value)
    }
}

impl From<RuleError> for SessionError {
    fn from(value: RuleError) -> Self {
        match value {
            RuleError::Store(err) => err.into(),
            RuleError::InvalidState(err) => Self::InvalidState(err),
        }
    }
}

/// In-memory construction portfolio.
#[derive(Debug, Clone)]
pub struct Session {
    config: CoreConfig,
    projects: EntityStore<Project>,
    members: EntityStore<TeamMember>,
    teams: EntityStore<Team>,
    clocking: EntityStore<ClockingEntry>,
    materials: EntityStore<Material>,
    suppliers: EntityStore<Supplier>,
    finance: EntityStore<FinancialRecord>,
    invoices: EntityStore<Invoice>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CoreConfig::default())
    }
}

impl Session {
    /// Empty session.
    pub fn new(config: CoreConfig) -> Self {
        Self {
            config,
            projects: EntityStore::new(),
            members: EntityStore::new(),
            teams: EntityStore::new(),
            clocking: EntityStore::new(),
            materials: EntityStore::new(),
            suppliers: EntityStore::new(),
            finance: EntityStore::new(),
            invoices: EntityStore::new(),
        }
    }

    /// Session loaded from `source`.
    ///
    /// Records keep their seed order. Invoice totals are recomputed, a
    /// project claimed by several teams stays with the last one, and a
    /// second clocking entry for the same member and date is rejected.
    pub fn from_seed<S: SeedSource + ?Sized>(source: &S, config: CoreConfig) -> SessionResult<Self> {
        let seed = source.load();
        let SeedData {
            projects,
            team_members,
            teams,
            clocking_entries,
            suppliers,
            materials,
            financial_records,
            mut invoices,
        } = seed;

        invoices.iter_mut().for_each(invoice_totals::recompute);

        let mut session = Self {
            config,
            projects: EntityStore::from_records(projects)?,
            members: EntityStore::from_records(team_members)?,
            teams: EntityStore::from_records(teams)?,
            clocking: EntityStore::new(),
            materials: EntityStore::from_records(materials)?,
            suppliers: EntityStore::from_records(suppliers)?,
            finance: EntityStore::from_records(financial_records)?,
            invoices: EntityStore::from_records(invoices)?,
        };

        for entry in clocking_entries {
            clocking_rules::insert_manual(&mut session.clocking, entry)?;
        }

        let claims: Vec<(String, String)> = session
            .teams
            .iter()
            .filter_map(|team| team.project_id.clone().map(|project| (team.id.clone(), project)))
            .collect();
        for (team_id, project_id) in claims {
            let released = enforce_exclusive_claim(&mut session.teams, &team_id, &project_id);
            if !released.is_empty() {
                log::warn!(
                    "event=seed_load module=session status=adjusted reason=duplicate_team_claim released={}",
                    released.len()
                );
            }
        }

        log::info!(
            "event=seed_load module=session status=ok projects={} members={} teams={} clocking={} materials={} suppliers={} finance={} invoices={}",
            session.projects.len(),
            session.members.len(),
            session.teams.len(),
            session.clocking.len(),
            session.materials.len(),
            session.suppliers.len(),
            session.finance.len(),
            session.invoices.len()
        );
        Ok(session)
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.list()
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    pub fn team_members(&self) -> &[TeamMember] {
        self.members.list()
    }

    pub fn team_member(&self, id: &str) -> Option<&TeamMember> {
        self.members.get(id)
    }

    pub fn teams(&self) -> &[Team] {
        self.teams.list()
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.get(id)
    }

    pub fn clocking_entries(&self) -> &[ClockingEntry] {
        self.clocking.list()
    }

    pub fn materials(&self) -> &[Material] {
        self.materials.list()
    }

    pub fn suppliers(&self) -> &[Supplier] {
        self.suppliers.list()
    }

    pub fn financial_records(&self) -> &[FinancialRecord] {
        self.finance.list()
    }

    pub fn invoices(&self) -> &[Invoice] {
        self.invoices.list()
    }

    pub fn invoice(&self, id: &str) -> Option<&Invoice> {
        self.invoices.get(id)
    }

    /// Owned copy of every store, shaped like a seed.
    pub fn snapshot(&self) -> SeedData {
        SeedData {
            projects: self.projects.list().to_vec(),
            team_members: self.members.list().to_vec(),
            teams: self.teams.list().to_vec(),
            clocking_entries: self.clocking.list().to_vec(),
            suppliers: self.suppliers.list().to_vec(),
            materials: self.materials.list().to_vec(),
            financial_records: self.finance.list().to_vec(),
            invoices: self.invoices.list().to_vec(),
        }
    }
}

/// Logs the outcome of a mutation and passes the result through.
pub(crate) fn logged<T>(event: &str, result: SessionResult<T>) -> SessionResult<T> {
    match &result {
        Ok(_) => log::info!("event={event} module=session status=ok"),
        Err(err) => log::warn!(
            "event={event} module=session status=error error={}",
            err.category()
        ),
    }
    result
}
