//! Dashboard and project list figures.

use crate::model::project::{Project, ProjectStatus, TaskStatus};
use crate::report::{all_tasks, matches_search, TaskWithProject};
use serde::Serialize;

pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: ProjectStatus,
    pub count: usize,
}

/// Per-status project counts in `ProjectStatus::ALL` order, empty buckets
/// omitted.
pub fn project_status_counts(projects: &[Project]) -> Vec<StatusCount> {
    ProjectStatus::ALL
        .iter()
        .map(|&status| StatusCount {
            status,
            count: projects.iter().filter(|p| p.status == status).count(),
        })
        .filter(|bucket| bucket.count > 0)
        .collect()
}

pub fn total_budget(projects: &[Project]) -> u64 {
    projects
        .iter()
        .fold(0u64, |sum, project| sum.saturating_add(project.budget))
}

/// Scales an amount to billions (`Mrd`) or millions (`M`) with one decimal.
pub fn format_budget(amount: u64, currency: &str) -> String {
    let amount = amount as f64;
    if amount >= 1_000_000_000.0 {
        format!("{:.1} Mrd {currency}", amount / 1_000_000_000.0)
    } else {
        format!("{:.1} M {currency}", amount / 1_000_000.0)
    }
}

/// Unfinished tasks across every project, soonest due first.
///
/// Ties keep project order then task order.
pub fn upcoming_tasks(projects: &[Project], limit: usize) -> Vec<TaskWithProject<'_>> {
    let mut tasks: Vec<TaskWithProject<'_>> = all_tasks(projects)
        .filter(|entry| entry.task.status != TaskStatus::Done)
        .collect();
    tasks.sort_by_key(|entry| entry.task.due_date);
    tasks.truncate(limit);
    tasks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub in_progress_projects: usize,
    pub total_budget: u64,
    pub tasks_to_do: usize,
    pub completed_tasks: usize,
}

pub fn dashboard_summary(projects: &[Project]) -> DashboardSummary {
    DashboardSummary {
        in_progress_projects: projects
            .iter()
            .filter(|p| p.status == ProjectStatus::InProgress)
            .count(),
        total_budget: total_budget(projects),
        tasks_to_do: projects.iter().map(|p| p.count_tasks(TaskStatus::ToDo)).sum(),
        completed_tasks: projects.iter().map(|p| p.count_tasks(TaskStatus::Done)).sum(),
    }
}

/// Completion percentage: 100 for completed projects, otherwise the share
/// of done tasks, 0 without tasks.
pub fn project_progress(project: &Project) -> u8 {
    if project.status == ProjectStatus::Completed {
        return 100;
    }
    let total = project.tasks.len();
    if total == 0 {
        return 0;
    }
    let done = project.count_tasks(TaskStatus::Done);
    ((done as f64 / total as f64) * 100.0).round() as u8
}

/// Projects matching `search` on name, address or manager, optionally
/// restricted to one status.
pub fn filter_projects<'a>(
    projects: &'a [Project],
    search: &str,
    status: Option<ProjectStatus>,
) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| status.map_or(true, |status| p.status == status))
        .filter(|p| {
            matches_search(
                search,
                &[
                    Some(p.name.as_str()),
                    Some(p.address.as_str()),
                    Some(p.manager.as_str()),
                ],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::format_budget;

    #[test]
    fn budget_breakpoints() {
        assert_eq!(format_budget(2_500_000_000, "FCFA"), "2.5 Mrd FCFA");
        assert_eq!(format_budget(1_000_000_000, "FCFA"), "1.0 Mrd FCFA");
        assert_eq!(format_budget(999_999_999, "FCFA"), "1000.0 M FCFA");
        assert_eq!(format_budget(450_000_000, "FCFA"), "450.0 M FCFA");
        assert_eq!(format_budget(0, "FCFA"), "0.0 M FCFA");
    }
}
