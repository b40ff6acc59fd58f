//! Month planning grid.

use crate::model::project::{Project, ProjectId};
use crate::report::{all_tasks, TaskWithProject};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Cells in a six-week grid.
pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
}

/// Monday-first 42-cell grid for `month` of `year`, padded with the tail of
/// the previous month and the head of the next one.
///
/// Returns `None` for an invalid month.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<CalendarDay>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let leading = i64::from(first.weekday().num_days_from_monday());
    let start = first - Duration::days(leading);
    let grid = (0..GRID_CELLS as i64)
        .map(|offset| {
            let date = start + Duration::days(offset);
            CalendarDay {
                date,
                is_current_month: date.year() == year && date.month() == month,
            }
        })
        .collect();
    Some(grid)
}

/// Tasks due on `date`, restricted to `visible_projects` when given.
pub fn tasks_on<'a>(
    projects: &'a [Project],
    date: NaiveDate,
    visible_projects: Option<&[ProjectId]>,
) -> Vec<TaskWithProject<'a>> {
    all_tasks(projects)
        .filter(|entry| entry.task.due_date == date)
        .filter(|entry| {
            visible_projects.map_or(true, |visible| visible.iter().any(|id| id == entry.project_id))
        })
        .collect()
}
