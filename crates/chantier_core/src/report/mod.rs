//! Read-only aggregations over store snapshots.
//!
//! # Responsibility
//! - Derive dashboard, clocking, finance, planning, inventory and team views
//!   from entity slices.
//!
//! # Invariants
//! - Every function here is pure: no store access, no logging, no clock.
//! - Dangling references never panic; they resolve to `None` or `"-"`.

pub mod calendar;
pub mod clocking;
pub mod dashboard;
pub mod finance;
pub mod inventory;
pub mod locale;
pub mod teams;

use crate::model::project::{Project, Task};
use serde::Serialize;

/// A task paired with the project that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithProject<'a> {
    pub project_id: &'a str,
    pub project_name: &'a str,
    pub task: &'a Task,
}

pub(crate) fn all_tasks(projects: &[Project]) -> impl Iterator<Item = TaskWithProject<'_>> {
    projects.iter().flat_map(|project| {
        project.tasks.iter().map(move |task| TaskWithProject {
            project_id: &project.id,
            project_name: &project.name,
            task,
        })
    })
}

/// Case-insensitive substring match; an empty needle matches everything.
pub(crate) fn matches_search(needle: &str, haystacks: &[Option<&str>]) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystacks
        .iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(&needle))
}
