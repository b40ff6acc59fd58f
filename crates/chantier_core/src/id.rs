//! Entity identifier generation.
//!
//! # Invariants
//! - IDs are `"{prefix}-{unix_millis}-{seq}"`.
//! - `seq` is process-wide and strictly increasing, so two IDs generated in
//!   the same millisecond still differ.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub const PROJECT_PREFIX: &str = "proj";
pub const TASK_PREFIX: &str = "task";
pub const DAILY_LOG_PREFIX: &str = "log";
pub const DOCUMENT_PREFIX: &str = "doc";
pub const TEAM_PREFIX: &str = "team";
pub const MEMBER_PREFIX: &str = "tm";
pub const CLOCKING_PREFIX: &str = "clk";
pub const MATERIAL_PREFIX: &str = "mat";
pub const SUPPLIER_PREFIX: &str = "sup";
pub const FINANCE_PREFIX: &str = "fin";
pub const INVOICE_PREFIX: &str = "inv";
pub const INVOICE_ITEM_PREFIX: &str = "item";

/// Returns a fresh identifier for `prefix`.
pub fn new_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{millis}-{seq}")
}

#[cfg(test)]
mod tests {
    use super::new_id;

    #[test]
    fn id_carries_prefix() {
        let id = new_id("proj");
        assert!(id.starts_with("proj-"));
        assert_eq!(id.split('-').count(), 3);
    }

    #[test]
    fn consecutive_ids_differ() {
        assert_ne!(new_id("tm"), new_id("tm"));
    }
}
