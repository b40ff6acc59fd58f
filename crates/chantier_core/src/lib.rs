//! Core domain logic for ChronoChantier.
//! This crate is the single source of truth for business invariants.

pub mod collab;
pub mod config;
pub mod dispatch;
pub mod id;
pub mod logging;
pub mod model;
pub mod report;
pub mod rules;
pub mod seed;
pub mod session;
pub mod store;

pub use collab::{
    request_confirmation, ConfirmationRequest, Confirmer, GenerationError, Notifier,
    ReportAssistant, TextGenerator, Toast, ToastId, ToastKind, ToastQueue,
};
pub use config::{ConfigError, CoreConfig};
pub use dispatch::{Command, Dispatched, Dispatcher, FormSubmission};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::{Entity, EntityKind, ValidationError};
pub use rules::{InvalidState, RuleError};
pub use seed::{DemoSeed, EmptySeed, SeedData, SeedSource};
pub use session::{SavedReport, Session, SessionError, SessionResult};
pub use store::{EntityStore, InsertAt, StoreError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
