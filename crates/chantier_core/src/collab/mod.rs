//! Collaborator contracts consumed by the core.
//!
//! # Responsibility
//! - Define the notification, confirmation, text generation and seed data
//!   seams as traits.
//! - Ship in-memory implementations usable by tests and the FFI shell.
//!
//! # Invariants
//! - Collaborator failures never escape as panics; text generation failures
//!   become in-band strings.

pub mod confirm;
pub mod notify;
pub mod text;

pub use confirm::{request_confirmation, ConfirmationRequest, Confirmer};
pub use notify::{Notifier, Toast, ToastId, ToastKind, ToastQueue};
pub use text::{GenerationError, ReportAssistant, TextGenerator};
